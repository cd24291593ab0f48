//! JSONL file writer for request events.
//!
//! Each [`RequestEvent`] is serialized as a single JSON line with a
//! `timestamp`, appended to the file via a buffered writer.

use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use strata_application::{RequestEvent, RequestLogger, RequestOutcome};
use tracing::warn;

/// JSONL request logger that writes one JSON object per settled call.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file so
/// the log survives across runs. Flushes on `Drop`.
pub struct JsonlRequestLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlRequestLogger {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create request log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open request log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: &RequestEvent, timestamp: String) -> Value {
    let mut record = json!({
        "timestamp": timestamp,
        "method": event.method.as_str(),
        "path": event.path,
        "elapsed_ms": event.elapsed_ms,
        "deduplicated": event.deduplicated,
    });
    match &event.outcome {
        RequestOutcome::Response { status } => {
            record["status"] = json!(status);
        }
        RequestOutcome::Failed { kind, message } => {
            record["error"] = json!({ "kind": kind, "message": message });
        }
    }
    record
}

impl RequestLogger for JsonlRequestLogger {
    fn log(&self, event: RequestEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&record(&event, timestamp)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Append-only; flush each record so a crash loses nothing
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlRequestLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
