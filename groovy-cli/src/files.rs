//! Input discovery
//!
//! Paths named on the command line are taken as given. Directories are walked with
//! `ignore`, so `.gitignore` rules apply, and only files with a configured extension
//! are kept.

use groovy_config::FmtConfig;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Expand `paths` into the sorted list of files to format.
pub fn collect_files(paths: &[PathBuf], config: &FmtConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, config, &mut files);
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    debug!(count = files.len(), "collected input files");
    files
}

fn walk(root: &Path, config: &FmtConfig, files: &mut Vec<PathBuf>) {
    for result in WalkBuilder::new(root).build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if config.matches_extension(path) {
            files.push(path.to_path_buf());
        }
    }
}
