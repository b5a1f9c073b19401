use crate::error::{IoContext, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntry {
    pub original: String,
    pub rewritten: String,
}

/// Run-scoped audit log of tag rewrites. Truncated when created, appended
/// to for every processed file, never read back.
pub struct ChangeLog {
    path: PathBuf,
    writer: BufWriter<File>,
    entries: usize,
}

impl ChangeLog {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).at(parent)?;
        }
        let file = File::create(path).at(path)?;
        log::debug!("Change log: {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            entries: 0,
        })
    }

    /// Append one `original -> rewritten` block and flush it.
    pub fn append(&mut self, entry: &ChangeLogEntry) -> Result<()> {
        writeln!(self.writer, "{} -> {}\n", entry.original, entry.rewritten)
            .and_then(|_| self.writer.flush())
            .at(&self.path)?;
        self.entries += 1;
        Ok(())
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(original: &str, rewritten: &str) -> ChangeLogEntry {
        ChangeLogEntry {
            original: original.to_string(),
            rewritten: rewritten.to_string(),
        }
    }

    #[test]
    fn appends_blocks_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/changes.log");
        let mut log = ChangeLog::create(&path).unwrap();
        log.append(&entry("A & B", "A; B")).unwrap();
        log.append(&entry("C feat. D", "C; D")).unwrap();
        assert_eq!(log.entries(), 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "A & B -> A; B\n\nC feat. D -> C; D\n\n");
    }

    #[test]
    fn create_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changes.log");
        std::fs::write(&path, "stale -> stale\n\n").unwrap();

        let log = ChangeLog::create(&path).unwrap();
        assert_eq!(log.entries(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
