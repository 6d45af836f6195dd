//! Size-rotated append-only line writer for trace files.
//!
//! When the file grows past the size limit it is shifted into numbered
//! backups: `notepane-otlp.json` becomes `notepane-otlp.json.1`, `.1`
//! becomes `.2` and so on. The oldest backup beyond the retention limit is
//! removed.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer. The file is opened lazily on first write.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_max_bytes(file_path, MAX_FILE_SIZE_BYTES)
    }

    /// Writer that rotates once the file exceeds `max_bytes`.
    pub const fn with_max_bytes(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes, rotating first if needed.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from rotation, opening or writing, and an error if
    /// the internal lock was poisoned.
    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| std::io::Error::other(format!("mutex poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes) {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let Some(file) = writer.as_mut() else {
            return Err(std::io::Error::other("no file available"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shifts `file.N` to `file.N+1`, dropping the last, then moves the live file to `file.1`.
    fn rotate(&self) -> std::io::Result<()> {
        let oldest = self.backup_path(MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path().join("trace.json"));

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_max_bytes(path.clone(), 4);

        for line in ["first", "second", "third"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "third\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.1")).unwrap(), "second\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.2")).unwrap(), "first\n");
    }

    #[test]
    fn keeps_at_most_three_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_max_bytes(path, 1);

        for i in 0..6 {
            writer.write_line(&format!("line{i}")).unwrap();
        }

        assert!(dir.path().join("trace.json.3").exists());
        assert!(!dir.path().join("trace.json.4").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("trace.json.3")).unwrap(),
            "line2\n"
        );
    }
}
