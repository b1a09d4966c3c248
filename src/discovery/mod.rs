//! Locating JVM and Kotlin installations on disk.
//!
//! These probes feed the index builder its search roots; they never
//! return an empty path, only an explicit not-found error.

mod java;
mod kotlin;

pub use java::find_java;
pub use kotlin::find_kotlin;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::Language;
use crate::error::DiscoveryError;

/// How many symlink hops [`follow_symlinks`] will take before giving up.
const MAX_SYMLINK_HOPS: usize = 32;

/// The ordered list of directories to scan for jar files: any
/// caller-supplied extras first, then the Java installation, then (in
/// Kotlin mode) the Kotlin installation. A missing Kotlin install only
/// warns; finding nothing at all is an error.
pub fn search_roots(language: Language, extra: &[PathBuf]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut roots: Vec<PathBuf> = extra.to_vec();

    match find_java() {
        Ok(root) => roots.push(root),
        Err(err) if roots.is_empty() && language == Language::Java => return Err(err),
        Err(err) => warn!("{err}"),
    }

    if language == Language::Kotlin {
        match find_kotlin() {
            Ok(root) => roots.push(root),
            Err(err) if roots.is_empty() => return Err(err),
            Err(err) => warn!("{err}"),
        }
    }

    if roots.is_empty() {
        return Err(DiscoveryError::JavaNotFound);
    }
    Ok(roots)
}

/// Looks for an executable with the given name in `$PATH`.
pub fn which(executable: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(executable))
        .find(|candidate| candidate.is_file())
}

/// Follows a chain of symlinks to its target, resolving relative link
/// targets against the link's own directory.
pub fn follow_symlinks(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        let target = match std::fs::read_link(&current) {
            Ok(target) => target,
            Err(_) => break,
        };
        current = if target.is_absolute() {
            target
        } else {
            match current.parent() {
                Some(parent) => parent.join(target),
                None => target,
            }
        };
    }
    current
}

/// Extracts the value of a `NAME=value` assignment from a file such as
/// `/etc/environment` or the `kotlinc` launcher script.
pub fn read_home_variable(file: &Path, variable: &str) -> Result<PathBuf, DiscoveryError> {
    let data = std::fs::read_to_string(file)
        .map_err(|_| DiscoveryError::etc_environment_miss(variable))?;
    for line in data.lines() {
        if !line.contains(variable) || line.matches('=').count() != 1 {
            continue;
        }
        let Some((_, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"');
        if !value.is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    Err(DiscoveryError::etc_environment_miss(variable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_home_variable() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("environment");
        let mut handle = std::fs::File::create(&file).unwrap();
        writeln!(handle, "LANG=en_US.UTF-8").unwrap();
        writeln!(handle, "JAVA_HOME=\"/usr/lib/jvm/java-21\"").unwrap();

        let path = read_home_variable(&file, "JAVA_HOME").unwrap();
        assert_eq!(path, PathBuf::from("/usr/lib/jvm/java-21"));
    }

    #[test]
    fn test_read_home_variable_miss() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("environment");
        std::fs::write(&file, "LANG=C\n").unwrap();
        assert!(read_home_variable(&file, "JAVA_HOME").is_err());
    }

    #[test]
    fn test_read_home_variable_skips_double_equals() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("script");
        std::fs::write(&file, "KOTLIN_HOME=a=b\n").unwrap();
        assert!(read_home_variable(&file, "KOTLIN_HOME").is_err());
    }

    #[test]
    fn test_follow_symlinks_passes_regular_files_through() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain");
        std::fs::write(&file, "x").unwrap();
        assert_eq!(follow_symlinks(&file), file);
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_symlinks_resolves_relative_links() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real");
        std::fs::write(&target, "x").unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink("real", &link).unwrap();
        assert_eq!(follow_symlinks(&link), target);
    }

    #[test]
    fn test_which_misses_nonsense() {
        assert!(which("definitely-not-an-executable-name").is_none());
    }
}
