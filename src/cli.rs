use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Language {
    Java,
    Kotlin,
}

impl Language {
    /// Package prefixes whose classes are importable without an import
    /// statement and must never appear in generated imports.
    pub fn implicit_roots(self) -> &'static [&'static str] {
        match self {
            Self::Java => &["java.lang."],
            Self::Kotlin => &["java.lang.", "kotlin."],
        }
    }

    /// Java import lines end with a semicolon, Kotlin lines are bare.
    pub fn statement_terminator(self) -> &'static str {
        match self {
            Self::Java => ";",
            Self::Kotlin => "",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "importfix", version)]
#[command(about = "Resolve class names to imports and organize import blocks", long_about = None)]
pub struct Args {
    /// Start of a class name to look up, e.g. "FileInputS"
    #[arg(value_name = "CLASS")]
    pub class_name: Option<String>,

    /// Source file to compute imports for (.java or .kt)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print only the single shortest match for CLASS
    #[arg(short, long)]
    pub shortest: bool,

    /// Match CLASS exactly instead of as a prefix
    #[arg(short, long)]
    pub exact: bool,

    /// Only consider Java (skip the Kotlin jar search path)
    #[arg(short = 'j', long)]
    pub java: bool,

    /// Expand wildcard imports into explicit imports
    #[arg(short = 'n', long)]
    pub noglob: bool,

    /// Keep existing import lines instead of replacing them
    #[arg(short = 'k', long)]
    pub keep: bool,

    /// Rewrite the source file in place instead of printing the import block
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Extra directory to search for jar files. Can be given multiple times.
    #[arg(long, value_name = "DIR")]
    pub jar_dir: Vec<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.class_name.is_none() && self.file.is_none() {
            anyhow::bail!("Nothing to do - give a class name or --file");
        }
        if let Some(ref file) = self.file {
            if !file.exists() {
                anyhow::bail!("Source file does not exist: {}", file.display());
            }
        }
        if self.write && self.file.is_none() {
            anyhow::bail!("--write requires --file");
        }
        for dir in &self.jar_dir {
            if !dir.is_dir() {
                anyhow::bail!("Not a directory: {}", dir.display());
            }
        }
        Ok(())
    }

    /// The language the run operates in: forced Java with -j, otherwise
    /// taken from the source file extension, defaulting to Java.
    pub fn language(&self) -> Language {
        if self.java {
            return Language::Java;
        }
        self.file
            .as_deref()
            .and_then(detect_language)
            .unwrap_or(Language::Java)
    }
}

pub fn detect_language(file_path: &Path) -> Option<Language> {
    file_path.extension()?.to_str().and_then(|ext| match ext {
        "java" => Some(Language::Java),
        "kt" | "kts" => Some(Language::Kotlin),
        _ => None,
    })
}
