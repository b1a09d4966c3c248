//! Archive discovery and per-archive class extraction.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::IndexError;
use crate::index::normalize::qualified_from_entry;

/// Recursively collects every jar file under the given root. Unreadable
/// subtrees are logged and skipped, never fatal.
pub fn find_archives(root: &Path) -> Vec<PathBuf> {
    let mut archives = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable path under {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let is_jar = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"));
        if is_jar {
            archives.push(entry.into_path());
        }
    }
    debug!("found {} archives under {}", archives.len(), root.display());
    archives
}

/// Opens the jar at `path` and sends the qualified name of every class
/// entry down the channel. The zip reader is scoped to this call.
pub fn scan_archive(path: &Path, found: &Sender<String>) -> Result<(), IndexError> {
    let file = File::open(path).map_err(|err| IndexError::archive_open(path, err))?;
    let archive =
        ZipArchive::new(BufReader::new(file)).map_err(|err| IndexError::archive_read(path, err))?;

    for entry_name in archive.file_names() {
        if let Some(qualified) = qualified_from_entry(entry_name) {
            // The receiver only hangs up when the build is being torn
            // down, so a send failure just ends this scan early.
            if found.send(qualified).is_err() {
                break;
            }
        }
    }
    Ok(())
}
