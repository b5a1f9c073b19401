use crate::prune::KEEP_FILE;
use crate::SUPPORTED_EXTENSIONS;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audio files under `root`, as paths relative to `root`, in sorted order.
///
/// Directories listed in `exclude` are not descended into, so output roots
/// nested inside the input tree are never rescanned.
pub fn list_files(root: &Path, exclude: &[&Path]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && exclude.contains(&e.path())));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() == KEEP_FILE {
            continue;
        }
        if !is_supported(entry.path()) {
            log::debug!("Not an audio file: {}", entry.path().display());
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }

    files
}

fn is_supported(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}
