//! Size-rotating log file used as a `tracing-subscriber` writer.
//!
//! When the log grows past [`MAX_FILE_SIZE_BYTES`] it is renamed to
//! `<file>.<unix_millis>` and a fresh file is started. At most
//! [`MAX_BACKUP_FILES`] rotated files are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated files to retain.
pub const MAX_BACKUP_FILES: usize = 3;

/// Shared rotating log file.
///
/// Cloning is cheap; all clones append to the same file. The file is opened
/// lazily on the first write.
#[derive(Clone)]
pub struct RotatingFile {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    /// Rotating file with a custom size threshold.
    #[must_use]
    pub fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                max_bytes,
                file: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Appends `buf`, rotating first if the file is over the threshold.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened, rotated or written.
    pub fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = self
            .inner
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("log file mutex poisoned: {e}")))?;

        if fs::metadata(&self.inner.path).is_ok_and(|m| m.len() > self.inner.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.inner.path)?;
            *guard = Some(file);
        }

        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::other("log file unavailable"))?;
        file.write_all(buf)?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut backup = self.inner.path.clone().into_os_string();
        backup.push(format!(".{timestamp}"));

        if self.inner.path.exists() {
            fs::rename(&self.inner.path, PathBuf::from(backup))?;
        }
        self.prune_backups()
    }

    /// Deletes the oldest rotated files beyond the retention limit.
    fn prune_backups(&self) -> io::Result<()> {
        let parent = self
            .inner
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let Some(file_name) = self.inner.path.file_name().and_then(|n| n.to_str()) else {
            return Err(io::Error::other("log file name is not valid UTF-8"));
        };
        let prefix = format!("{file_name}.");

        let mut backups: Vec<(u64, PathBuf)> = fs::read_dir(parent)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let stamp = name.to_str()?.strip_prefix(&prefix)?.parse::<u64>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, stale) in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.inner.path)
            .field("max_bytes", &self.inner.max_bytes)
            .finish_non_exhaustive()
    }
}

/// Per-event writer handed out by [`RotatingFile`]'s `MakeWriter` impl.
pub struct RotatingWriter {
    target: RotatingFile,
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.target.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter {
            target: self.clone(),
        }
    }
}
