//! The class index: a map from simple class name to one qualified path,
//! built concurrently from the jar archives under a set of search roots.

pub mod normalize;
pub mod scanner;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{bounded, unbounded};
use tracing::{debug, info, warn};

use crate::error::IndexError;
use normalize::simple_name;

/// How many discovered class names may sit between the scanning workers
/// and the aggregator before the workers block.
const FOUND_QUEUE_DEPTH: usize = 512;

/// Mapping from simple class name to exactly one qualified path.
/// Conflicts resolve to the shortest path; equal lengths keep the first
/// writer, which depends on scan order and is not stable across runs.
///
/// Built once by [`build_index`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct ClassIndex {
    classes: HashMap<String, String>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index directly from qualified paths, bypassing the
    /// filesystem. Lets tests and embedders substitute a fixture index.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry.into());
        }
        index
    }

    /// Inserts under the shortest-path-wins policy: an existing path that
    /// is no longer than the candidate stays.
    fn insert(&mut self, qualified: String) {
        let simple = simple_name(&qualified).to_string();
        match self.classes.get(&simple) {
            Some(existing) if existing.len() <= qualified.len() => {}
            _ => {
                self.classes.insert(simple, qualified);
            }
        }
    }

    /// The qualified path registered for a simple class name.
    pub fn get(&self, simple: &str) -> Option<&str> {
        self.classes.get(simple).map(String::as_str)
    }

    /// All `(simple name, qualified path)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Scans every jar under the given roots and builds the class index.
///
/// Roots that are not directories are skipped with a warning; if none of
/// them is a directory the build fails. Archives that cannot be opened
/// are skipped without failing the build. Jar scanning fans out over a
/// worker pool; every discovered class funnels through a bounded channel
/// into this thread, which is the only writer.
pub fn build_index(roots: &[PathBuf]) -> Result<ClassIndex, IndexError> {
    let dirs: Vec<&Path> = roots
        .iter()
        .map(PathBuf::as_path)
        .filter(|path| {
            if path.is_dir() {
                true
            } else {
                warn!("skipping search path {}: not a directory", path.display());
                false
            }
        })
        .collect();

    if dirs.is_empty() {
        return Err(IndexError::NoSearchDirectories);
    }

    let mut archives = Vec::new();
    for dir in &dirs {
        archives.extend(scanner::find_archives(dir));
    }
    debug!("scanning {} archives", archives.len());

    let workers = num_cpus::get().clamp(1, archives.len().max(1));
    let (job_tx, job_rx) = unbounded::<PathBuf>();
    let (found_tx, found_rx) = bounded::<String>(FOUND_QUEUE_DEPTH);

    for archive in archives {
        // Receiver stays alive until the scope ends, so this cannot fail.
        let _ = job_tx.send(archive);
    }
    drop(job_tx);

    let mut index = ClassIndex::new();
    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let found_tx = found_tx.clone();
            scope.spawn(move || {
                for archive in job_rx.iter() {
                    if let Err(err) = scanner::scan_archive(&archive, &found_tx) {
                        warn!("skipping archive: {err}");
                    }
                }
            });
        }
        drop(found_tx);

        for qualified in found_rx.iter() {
            index.insert(qualified);
        }
    });

    info!("indexed {} classes", index.len());
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_path_wins() {
        let mut index = ClassIndex::new();
        index.insert("org.very.long.package.name.List".to_string());
        index.insert("java.util.List".to_string());
        assert_eq!(index.get("List"), Some("java.util.List"));

        // Reverse insertion order gives the same winner.
        let mut index = ClassIndex::new();
        index.insert("java.util.List".to_string());
        index.insert("org.very.long.package.name.List".to_string());
        assert_eq!(index.get("List"), Some("java.util.List"));
    }

    #[test]
    fn test_equal_length_keeps_first_writer() {
        let mut index = ClassIndex::new();
        index.insert("com.aa.Thing".to_string());
        index.insert("com.bb.Thing".to_string());
        assert_eq!(index.get("Thing"), Some("com.aa.Thing"));
    }

    #[test]
    fn test_from_entries() {
        let index = ClassIndex::from_entries(["java.io.File", "java.util.Scanner"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("File"), Some("java.io.File"));
        assert_eq!(index.get("Scanner"), Some("java.util.Scanner"));
        assert_eq!(index.get("Missing"), None);
    }

    #[test]
    fn test_build_index_requires_one_valid_root() {
        let roots = vec![PathBuf::from("/no/such/dir"), PathBuf::from("/also/gone")];
        assert!(matches!(
            build_index(&roots),
            Err(IndexError::NoSearchDirectories)
        ));
    }
}
