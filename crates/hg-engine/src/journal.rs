//! JSONL mutation journal.
//!
//! Appends [`JournalEntry`] records to per-day `{journal_dir}/{YYYY-MM-DD}.jsonl`
//! files with `serde_jsonlines::append_json_lines`. Registries append while
//! holding their write lock and before committing, so a failed append leaves
//! the registry untouched. The file write runs on the blocking pool; the
//! caller's lock guard stays held across the await.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use hg_core::enums::{EntityKind, JournalOp};
use hg_core::journal::JournalEntry;

use crate::error::EngineError;

pub struct JournalWriter {
    journal_dir: PathBuf,
    enabled: bool,
}

impl JournalWriter {
    /// Create a writer for the given directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Journal` if the directory cannot be created.
    pub fn new(journal_dir: PathBuf) -> Result<Self, EngineError> {
        std::fs::create_dir_all(&journal_dir).map_err(|e| {
            EngineError::Journal(format!("cannot create {}: {e}", journal_dir.display()))
        })?;
        Ok(Self {
            journal_dir,
            enabled: true,
        })
    }

    /// A writer that accepts and discards every entry.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            journal_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }

    /// Journal file for the day containing `at`.
    #[must_use]
    pub fn path_for(&self, day: NaiveDate) -> PathBuf {
        self.journal_dir.join(format!("{}.jsonl", day.format("%Y-%m-%d")))
    }

    /// Serialize `data` and append one entry stamped `at`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Json` if `data` cannot be serialized, or
    /// `EngineError::Journal` if the append fails.
    pub async fn record<T: Serialize>(
        &self,
        op: JournalOp,
        entity: EntityKind,
        id: &str,
        data: &T,
        at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        if !self.enabled {
            return Ok(());
        }
        let entry = JournalEntry {
            v: 1,
            ts: at.to_rfc3339(),
            op,
            entity,
            id: id.to_string(),
            data: serde_json::to_value(data)?,
        };
        self.append(entry, at.date_naive()).await
    }

    /// Append a prepared entry to the file for `day`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Journal` if the file write fails.
    pub async fn append(&self, entry: JournalEntry, day: NaiveDate) -> Result<(), EngineError> {
        if !self.enabled {
            return Ok(());
        }
        let path = self.path_for(day);
        let target = format!("{} {} -> {}", entry.entity, entry.id, path.display());
        tokio::task::spawn_blocking(move || serde_jsonlines::append_json_lines(&path, [&entry]))
            .await
            .map_err(|e| EngineError::Journal(format!("{target}: append task failed: {e}")))?
            .map_err(|e| EngineError::Journal(format!("{target}: {e}")))
    }

    /// Read back every entry recorded on `day`. A day with no file is empty.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Journal` if the file exists but cannot be parsed.
    pub fn read_day(&self, day: NaiveDate) -> Result<Vec<JournalEntry>, EngineError> {
        let path = self.path_for(day);
        if !self.enabled || !path.exists() {
            return Ok(Vec::new());
        }
        let read = || -> std::io::Result<Vec<JournalEntry>> {
            serde_jsonlines::json_lines(&path)?.collect()
        };
        read().map_err(|e| EngineError::Journal(format!("{}: {e}", path.display())))
    }
}
