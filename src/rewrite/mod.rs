//! Rewriting and organizing import blocks.
//!
//! The rewriter is a pure function of (source text, resolver, options):
//! it computes the imports the source needs, merges them with whatever
//! import lines the file already has, and reattaches the surrounding
//! text unchanged.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::cli::Language;
use crate::resolver::Resolver;

#[derive(Debug, Clone, Copy)]
pub struct RewriteOptions {
    pub language: Language,
    /// Replace existing import lines for packages the source needs, or
    /// keep every existing line and only append what is missing.
    pub replace_existing: bool,
    /// Emit explicit imports instead of package wildcards.
    pub de_glob: bool,
}

/// One computed import: either a specific class import, or a package
/// wildcard carrying the simple names that were grouped into it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportEntry {
    path: String,
    members: Vec<String>,
}

impl ImportEntry {
    fn is_wildcard(&self) -> bool {
        !self.members.is_empty()
    }

    fn package(&self) -> &str {
        package_of(&self.path)
    }

    fn render(&self, language: Language, de_glob: bool) -> Vec<String> {
        let term = language.statement_terminator();
        if !self.is_wildcard() {
            return vec![format!("import {}{}", self.path, term)];
        }
        if de_glob {
            let package = self.package();
            return self
                .members
                .iter()
                .map(|member| format!("import {package}.{member}{term}"))
                .collect();
        }
        vec![format!(
            "import {}{} // {}",
            self.path,
            term,
            self.members.join(", ")
        )]
    }
}

/// A line of the input's import region, kept verbatim. `path` is `None`
/// for blank separator lines and for lines that start like an import but
/// could not be parsed; both are preserved untouched rather than
/// discarded.
#[derive(Debug)]
struct ExistingLine {
    raw: String,
    path: Option<String>,
}

/// The source text split around its import region.
struct Document<'a> {
    head: Vec<&'a str>,
    existing: Vec<ExistingLine>,
    tail: Vec<&'a str>,
    had_imports: bool,
}

/// Rewrites the import block of `source` and returns the whole document.
/// Inputs with no class-looking tokens and no import lines come back
/// unchanged.
pub fn rewrite_source(source: &str, resolver: &Resolver, opts: &RewriteOptions) -> String {
    let used = resolver.find_used_imports(source);
    let document = split_document(source);

    if !document.had_imports && used.is_empty() {
        return source.to_string();
    }
    debug!("{} imports in use, {} existing lines", used.len(), document.existing.len());

    let entries = group_by_package(&used);

    let (preserved, new_entries) = if opts.replace_existing {
        let touched: HashSet<&str> = used.iter().map(|path| package_of(path)).collect();
        let preserved = document
            .existing
            .iter()
            .filter(|line| match &line.path {
                Some(path) => !touched.contains(package_of(path)),
                None => true,
            })
            .collect::<Vec<_>>();
        (preserved, entries)
    } else {
        let present: Vec<&str> = document
            .existing
            .iter()
            .filter_map(|line| line.path.as_deref())
            .collect();
        let new_entries = entries
            .into_iter()
            .filter(|entry| !covered_by(&present, entry))
            .collect();
        (document.existing.iter().collect(), new_entries)
    };

    let mut block: Vec<String> = Vec::new();
    for line in &preserved {
        match opts.de_glob.then(|| expand_wildcard_line(&line.raw)).flatten() {
            Some(expanded) => block.extend(expanded),
            None => block.push(line.raw.clone()),
        }
    }
    for entry in &new_entries {
        block.extend(entry.render(opts.language, opts.de_glob));
    }

    // Dropping lines can orphan their separator blanks; collapse runs
    // and trim the block's edges.
    let mut tidy: Vec<String> = Vec::new();
    for line in block {
        let blank = line.trim().is_empty();
        if blank && tidy.last().map_or(true, |prev: &String| prev.trim().is_empty()) {
            continue;
        }
        tidy.push(line);
    }
    while tidy.last().is_some_and(|line| line.trim().is_empty()) {
        tidy.pop();
    }

    assemble(&document, tidy)
}

/// Computes just the normalized import block for `source`: the needed
/// imports grouped by package, annotated, and sorted. No reconciliation
/// with existing lines.
pub fn import_block(source: &str, resolver: &Resolver, opts: &RewriteOptions) -> String {
    let used = resolver.find_used_imports(source);
    let mut lines = Vec::new();
    for entry in group_by_package(&used) {
        lines.extend(entry.render(opts.language, opts.de_glob));
    }
    lines.join("\n")
}

/// One specific import line per needed class, sorted by path, with no
/// package grouping. The flat form of [`import_block`].
pub fn organized_imports(source: &str, resolver: &Resolver, language: Language) -> String {
    let term = language.statement_terminator();
    let mut used = resolver.find_used_imports(source);
    used.sort_unstable();
    used.iter()
        .map(|path| format!("import {path}{term}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Expands every annotated wildcard line in an import block back into
/// the explicit imports named by its annotation. Other lines pass
/// through unchanged.
pub fn de_glob_lines(block: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in block.lines() {
        match expand_wildcard_line(line) {
            Some(expanded) => out.extend(expanded),
            None => out.push(line.to_string()),
        }
    }
    out
}

fn expand_wildcard_line(line: &str) -> Option<Vec<String>> {
    let (stmt, comment) = line.split_once("//")?;
    let path = parse_import_path(stmt)?;
    let package = path.strip_suffix(".*")?;
    let term = if stmt.trim_end().ends_with(';') { ";" } else { "" };
    let members: Vec<&str> = comment
        .split(',')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .collect();
    if members.is_empty() {
        return None;
    }
    Some(
        members
            .iter()
            .map(|member| format!("import {package}.{member}{term}"))
            .collect(),
    )
}

/// Groups needed paths by package: packages needing two or more classes
/// collapse into one wildcard entry that remembers its members, a package
/// with a single class keeps the specific import. Entries come back
/// sorted by path.
fn group_by_package(used: &[String]) -> Vec<ImportEntry> {
    let mut by_package: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for path in used {
        let (package, simple) = match path.rsplit_once('.') {
            Some((package, simple)) => (package, simple),
            None => ("", path.as_str()),
        };
        by_package.entry(package).or_default().push(simple);
    }

    let mut entries = Vec::new();
    for (package, mut simples) in by_package {
        if simples.len() >= 2 && !package.is_empty() {
            simples.sort_unstable();
            entries.push(ImportEntry {
                path: format!("{package}.*"),
                members: simples.iter().map(|s| s.to_string()).collect(),
            });
        } else {
            for simple in simples {
                let path = if package.is_empty() {
                    simple.to_string()
                } else {
                    format!("{package}.{simple}")
                };
                entries.push(ImportEntry {
                    path,
                    members: Vec::new(),
                });
            }
        }
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// A new entry is already present when an existing line imports the same
/// path, or an existing package wildcard covers it.
fn covered_by(present: &[&str], entry: &ImportEntry) -> bool {
    let package = entry.package();
    present.iter().any(|existing| {
        *existing == entry.path
            || (existing.strip_suffix(".*").is_some_and(|pkg| pkg == package))
    })
}

fn package_of(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((package, _)) => package,
        None => "",
    }
}

fn is_import_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed == "import" || trimmed.starts_with("import ") || trimmed.starts_with("import\t")
}

/// Parses `import <path>;` (terminator and trailing comment optional)
/// into the path. Returns `None` for anything it does not understand.
fn parse_import_path(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix("import")?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let stmt = match rest.split_once("//") {
        Some((stmt, _)) => stmt,
        None => rest,
    };
    let path = stmt.trim().trim_end_matches(';').trim_end();
    if path.is_empty()
        || !path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '$' | '*'))
    {
        return None;
    }
    Some(path.to_string())
}

fn split_document(source: &str) -> Document<'_> {
    let lines: Vec<&str> = source.split('\n').collect();

    let first = lines.iter().position(|line| is_import_line(line));
    if let Some(first) = first {
        let last = lines
            .iter()
            .rposition(|line| is_import_line(line))
            .unwrap_or(first);
        let existing = lines[first..=last]
            .iter()
            .map(|line| ExistingLine {
                raw: line.to_string(),
                path: parse_import_path(line),
            })
            .collect();
        return Document {
            head: lines[..first].to_vec(),
            existing,
            tail: lines[last + 1..].to_vec(),
            had_imports: true,
        };
    }

    // No import lines; the prefix is everything the block may not be
    // inserted above: blank lines, comments, and the package declaration.
    let mut cut = 0;
    let mut in_block_comment = false;
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if in_block_comment {
            cut = i + 1;
            if trimmed.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        let is_prefix_line = trimmed.is_empty()
            || trimmed.starts_with("//")
            || trimmed.starts_with("package ")
            || trimmed.starts_with("@file:")
            || trimmed.starts_with("/*");
        if !is_prefix_line {
            break;
        }
        if trimmed.starts_with("/*") && !trimmed.contains("*/") {
            in_block_comment = true;
        }
        cut = i + 1;
    }

    Document {
        head: lines[..cut].to_vec(),
        existing: Vec::new(),
        tail: lines[cut..].to_vec(),
        had_imports: false,
    }
}

/// Reattaches the prefix and remainder around the new import block.
/// When the file already had imports the surrounding text is rejoined
/// verbatim; when the block is freshly inserted exactly one blank line
/// separates it from a non-empty prefix and from the remainder.
fn assemble(document: &Document<'_>, block: Vec<String>) -> String {
    let mut out: Vec<String> = Vec::new();

    if document.had_imports {
        out.extend(document.head.iter().map(|line| line.to_string()));
        out.extend(block);
        out.extend(document.tail.iter().map(|line| line.to_string()));
        return out.join("\n");
    }

    let head_end = document
        .head
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    let tail_start = document
        .tail
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(document.tail.len());

    if head_end > 0 {
        out.extend(document.head[..head_end].iter().map(|line| line.to_string()));
        out.push(String::new());
    }
    out.extend(block);
    if tail_start < document.tail.len() {
        out.push(String::new());
        out.extend(document.tail[tail_start..].iter().map(|line| line.to_string()));
    } else if document.head.last().is_some_and(|line| line.is_empty()) {
        // Preserve the original trailing newline.
        out.push(String::new());
    }
    out.join("\n")
}
