// Debug logging module for asynchronous match logging
//
// Records are queued on a channel and written by a single background task,
// so the match loop never waits on the file and lines land in ply order.
// Call `shutdown` before exiting to drain the queue.

use log::error;
use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::types::{Location, Player};

/// Represents a single debug log entry
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub ply: usize,
    pub player: Player,
    pub action: String,
    pub location: Option<Location>,
    pub depth: u32,
    /// Non-finite scores (proven wins and losses) serialize as null
    pub score: f64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
struct DebugLogEntry {
    #[serde(flatten)]
    record: TurnRecord,
    timestamp: String,
}

/// Match logger backed by one writer task
pub struct DebugLogger {
    sender: Option<mpsc::UnboundedSender<TurnRecord>>,
    writer: Option<JoinHandle<()>>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                let (sender, receiver) = mpsc::unbounded_channel();
                DebugLogger {
                    sender: Some(sender),
                    writer: Some(tokio::spawn(run_writer(file, receiver))),
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            sender: None,
            writer: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queues a turn for the writer task without blocking
    pub fn log_turn(&self, record: TurnRecord) {
        if let Some(sender) = &self.sender {
            if sender.send(record).is_err() {
                error!("Debug log writer has stopped, dropping record");
            }
        }
    }

    /// Closes the queue and waits until every queued record is on disk
    pub async fn shutdown(mut self) {
        // Dropping the sender ends the writer loop once the queue is empty
        self.sender = None;
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.await {
                error!("Debug log writer failed: {}", e);
            }
        }
    }
}

async fn run_writer(mut file: File, mut receiver: mpsc::UnboundedReceiver<TurnRecord>) {
    while let Some(record) = receiver.recv().await {
        write_record(&mut file, record).await;
    }
}

/// Writes one record and flushes it
async fn write_record(file: &mut File, record: TurnRecord) {
    let entry = DebugLogEntry {
        record,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    match serde_json::to_string(&entry) {
        Ok(json_line) => {
            let line_with_newline = format!("{}\n", json_line);
            if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                error!("Failed to write debug log entry: {}", e);
            } else if let Err(e) = file.flush().await {
                error!("Failed to flush debug log: {}", e);
            }
        }
        Err(e) => {
            error!("Failed to serialize debug log entry: {}", e);
        }
    }
}
