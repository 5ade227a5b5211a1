//! Re-order Ledger
//!
//! Append-only text file of re-order requests (`to_be_ordered.txt`), one
//! request per line. Appending reads the whole ledger, adds the new line and
//! writes the file back.
//!
//! Appends made through one `ReorderLedger` are serialised by an internal
//! mutex. Separate processes writing the same file can still lose lines.

use labstock_models::{ReorderRequest, LEDGER_FILE_NAME};
use labstock_utils::{validate_model, LabstockError, LabstockResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug)]
pub struct ReorderLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReorderLedger {
    /// Ledger stored as `to_be_ordered.txt` inside `directory`
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(LEDGER_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `request` and returns the line written.
    ///
    /// Not idempotent: the same request submitted twice is recorded twice.
    /// Requests that fail validation are refused, so every written line
    /// parses back into the request that produced it.
    pub async fn append(&self, request: &ReorderRequest) -> LabstockResult<String> {
        validate_model(request)?;

        let _guard = self.write_lock.lock().await;

        let mut contents = self.read_contents().await?;
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }

        let line = request.to_ledger_line();
        contents.push_str(&line);
        contents.push('\n');

        self.write_contents(&contents).await?;
        info!(
            part_number = %request.part_number,
            requester = %request.requester_name,
            "Re-order request recorded"
        );

        Ok(line)
    }

    /// Parsed ledger entries in file order; lines that do not parse are skipped
    pub async fn entries(&self) -> LabstockResult<Vec<ReorderRequest>> {
        let contents = self.read_contents().await?;

        let entries = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match ReorderRequest::from_ledger_line(line) {
                Ok(request) => Some(request),
                Err(error) => {
                    warn!(line = index + 1, error = %error, "Skipping unreadable ledger line");
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    /// Verifies the ledger directory exists (creating it if needed) and the
    /// ledger, when present, is readable.
    pub async fn health_check(&self) -> LabstockResult<()> {
        self.ensure_directory().await?;
        self.read_contents().await.map(|_| ())
    }

    /// Missing ledger reads as empty
    async fn read_contents(&self) -> LabstockResult<String> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(error) => Err(LabstockError::storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                error
            ))),
        }
    }

    async fn write_contents(&self, contents: &str) -> LabstockResult<()> {
        self.ensure_directory().await?;
        fs::write(&self.path, contents).await.map_err(|error| {
            LabstockError::storage(format!("Failed to write {}: {}", self.path.display(), error))
        })
    }

    async fn ensure_directory(&self) -> LabstockResult<()> {
        match self.path.parent() {
            Some(directory) if !directory.as_os_str().is_empty() => {
                fs::create_dir_all(directory).await.map_err(|error| {
                    LabstockError::storage(format!(
                        "Failed to create ledger directory {}: {}",
                        directory.display(),
                        error
                    ))
                })
            }
            _ => Ok(()),
        }
    }
}
