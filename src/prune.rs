use crate::error::{IoContext, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Placeholder that keeps the input root present between runs.
pub const KEEP_FILE: &str = ".keep";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub removed: u64,
}

/// Remove every directory under `root` that is empty once its own
/// subdirectories have been pruned. `root` itself always survives.
///
/// Sibling subtrees are pruned in parallel; a directory is re-listed only
/// after all of its children have finished.
pub fn prune(root: &Path) -> Result<PruneSummary> {
    let removed = prune_children(root)?;
    log::info!("Pruned {removed} empty directories under {}", root.display());
    Ok(PruneSummary { removed })
}

/// Create the `.keep` placeholder in `root` if it is missing.
pub fn ensure_keep(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root).at(root)?;
    let keep = root.join(KEEP_FILE);
    if !keep.exists() {
        std::fs::write(&keep, b"").at(&keep)?;
    }
    Ok(())
}

fn prune_children(dir: &Path) -> Result<u64> {
    let subdirs = list_subdirs(dir)?;
    subdirs
        .par_iter()
        .map(|sub| prune_dir(sub))
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

fn prune_dir(dir: &Path) -> Result<u64> {
    let mut removed = prune_children(dir)?;

    // Children may have just been removed, so look again.
    let empty = std::fs::read_dir(dir).at(dir)?.next().is_none();
    if empty {
        std::fs::remove_dir(dir).at(dir)?;
        log::debug!("Removed empty directory {}", dir.display());
        removed += 1;
    }
    Ok(removed)
}

fn list_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(dir).at(dir)? {
        let entry = entry.at(dir)?;
        if entry.file_type().at(&entry.path())?.is_dir() {
            subdirs.push(entry.path());
        }
    }
    Ok(subdirs)
}
