//! Append-only plain-text progress log: one rendered
//! [`ProgressEvent`] per line, flushed after every write and on drop.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use aicof_application::ports::ProgressSink;
use aicof_domain::progress::ProgressEvent;
use tracing::warn;

pub struct FileProgressLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileProgressLog {
    /// Opens (creating if absent) the log file in append mode. Creates
    /// parent directories as needed. Returns `None` if the file cannot
    /// be opened, mirroring the tolerant-degrade pattern used for the
    /// conversation logger this is adapted from.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("could not create progress log directory {}: {e}", parent.display());
                return None;
            }
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("could not open progress log file {}: {e}", path.display());
                return None;
            }
        };

        Some(FileProgressLog {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn now_rfc3339() -> String {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

impl ProgressSink for FileProgressLog {
    fn record(&self, event: ProgressEvent) -> Result<(), String> {
        let line = event.render(&Self::now_rfc3339());
        let mut writer = self.writer.lock().map_err(|e| e.to_string())?;
        writeln!(writer, "{line}").map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())
    }
}

impl Drop for FileProgressLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// Returns the last `n` lines of the progress log (all of them if
/// `n == 0`). Missing files read as empty rather than an error — a
/// fresh project simply has no history yet.
pub fn tail(path: &Path, n: usize) -> Result<Vec<String>, String> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    if n == 0 || n >= lines.len() {
        Ok(lines)
    } else {
        Ok(lines[lines.len() - n..].to_vec())
    }
}
