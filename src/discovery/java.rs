use std::path::{Path, PathBuf};

use tracing::debug;

use crate::discovery::{follow_symlinks, read_home_variable, which};
use crate::error::DiscoveryError;

const ARCH_JAVA_PATH: &str = "/usr/lib/jvm/default";
const DEBIAN_JAVA_PATH: &str = "/usr/lib/jvm/default-java";

/// Finds the most likely location of a Java installation (a directory
/// with jar files somewhere below it).
///
/// Probes, in order: `$JAVA_HOME`, the `java` executable on `$PATH`
/// (symlinks followed, taking the grandparent of the binary since it
/// lives in `bin/`), the conventional Arch and Debian paths, and a
/// `JAVA_HOME=` line in `/etc/environment`.
pub fn find_java() -> Result<PathBuf, DiscoveryError> {
    if let Ok(java_home) = std::env::var("JAVA_HOME") {
        let path = PathBuf::from(java_home);
        if path.is_dir() {
            debug!("using $JAVA_HOME: {}", path.display());
            return Ok(path);
        }
    }

    if let Some(executable) = which("java") {
        let resolved = follow_symlinks(&executable);
        if let Some(install_root) = resolved.parent().and_then(Path::parent) {
            if install_root.is_dir() {
                debug!("derived Java root from $PATH: {}", install_root.display());
                return Ok(install_root.to_path_buf());
            }
        }
    }

    for conventional in [ARCH_JAVA_PATH, DEBIAN_JAVA_PATH] {
        let path = Path::new(conventional);
        if path.is_dir() {
            return Ok(path.to_path_buf());
        }
    }

    if let Ok(path) = read_home_variable(Path::new("/etc/environment"), "JAVA_HOME") {
        if path.is_dir() {
            return Ok(path);
        }
    }

    Err(DiscoveryError::JavaNotFound)
}
