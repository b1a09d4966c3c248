use std::path::{Path, PathBuf};

use tracing::debug;

use crate::discovery::{read_home_variable, which};
use crate::error::DiscoveryError;

const KOTLIN_LIB_PATH: &str = "/usr/share/kotlin/lib";

/// Finds the most likely location of a Kotlin installation.
///
/// The `kotlinc` launcher on `$PATH` is a shell script that assigns
/// `KOTLIN_HOME=`; that value is preferred, falling back to the
/// conventional library path.
pub fn find_kotlin() -> Result<PathBuf, DiscoveryError> {
    if let Some(script) = which("kotlinc") {
        if let Ok(path) = read_home_variable(&script, "KOTLIN_HOME") {
            debug!("derived Kotlin root from kotlinc: {}", path.display());
            return Ok(path);
        }
    }

    let conventional = Path::new(KOTLIN_LIB_PATH);
    if conventional.is_dir() {
        return Ok(conventional.to_path_buf());
    }

    Err(DiscoveryError::KotlinNotFound)
}
