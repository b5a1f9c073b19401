use crate::error::{IoContext, Result, RunError};
use std::path::Path;
use walkdir::WalkDir;

/// Copy the fixture tree into `input`, keeping relative paths. Existing
/// files in `input` are overwritten. Returns the number of files copied.
pub fn stage(fixtures: &Path, input: &Path) -> Result<u64> {
    if !fixtures.is_dir() {
        return Err(RunError::MissingFixtures(fixtures.to_path_buf()));
    }

    let mut copied = 0;
    for entry in WalkDir::new(fixtures).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable fixture under {}: {}", fixtures.display(), e);
                continue;
            }
        };
        let Ok(relative) = entry.path().strip_prefix(fixtures) else {
            continue;
        };
        let dest = input.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).at(&dest)?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &dest).at(entry.path())?;
            copied += 1;
        }
    }

    log::info!(
        "Staged {copied} fixture files from {} into {}",
        fixtures.display(),
        input.display()
    );
    Ok(copied)
}
