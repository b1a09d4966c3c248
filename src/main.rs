use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;

use importfix::logging::{self, Verbosity};
use importfix::rewrite::{de_glob_lines, import_block, rewrite_source, RewriteOptions};
use importfix::{cli, discovery, index, Resolver};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let language = args.language();
    let roots = discovery::search_roots(language, &args.jar_dir)?;
    let class_index = index::build_index(&roots)?;
    let resolver = Resolver::new(class_index, language);

    if let Some(ref file) = args.file {
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("Cannot read {}", file.display()))?;
        let opts = RewriteOptions {
            language,
            replace_existing: !args.keep,
            de_glob: args.noglob,
        };
        if args.write {
            let rewritten = rewrite_source(&source, &resolver, &opts);
            std::fs::write(file, rewritten)
                .with_context(|| format!("Cannot write {}", file.display()))?;
        } else {
            let grouped = RewriteOptions {
                de_glob: false,
                ..opts
            };
            let mut block = import_block(&source, &resolver, &grouped);
            if args.noglob {
                block = de_glob_lines(&block).join("\n");
            }
            if !block.is_empty() {
                println!("{block}");
            }
        }
        return Ok(());
    }

    // validate() guarantees a class name when no file was given.
    let class_name = args
        .class_name
        .as_deref()
        .context("Nothing to do - give a class name or --file")?;

    if args.shortest {
        let (class, import) = resolver
            .prefix_best_match(class_name)
            .with_context(|| format!("could not find the {class_name} class"))?;
        print_match(&class, &import, language);
        return Ok(());
    }

    let matches = if args.exact {
        resolver
            .exact_wildcard_path(class_name)
            .map(|import| vec![(class_name.to_string(), import)])
            .unwrap_or_default()
    } else {
        resolver.prefix_all_matches(class_name)
    };
    if matches.is_empty() {
        if args.exact {
            anyhow::bail!("could not find the {class_name} class");
        }
        anyhow::bail!("found no class starting with {class_name}");
    }
    for (class, import) in matches {
        print_match(&class, &import, language);
    }
    Ok(())
}

fn print_match(class: &str, import: &str, language: cli::Language) {
    println!(
        "import {import}{} // {class}",
        language.statement_terminator()
    );
}
