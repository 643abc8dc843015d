// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only, date-partitioned activity log.
//!
//! One partition file per calendar day (`activity-YYYY-MM-DD.jsonl`), one
//! serialized entry per line. The partition is keyed on the *write* time,
//! not the entry's own timestamp, so lexical filename sort equals
//! chronological write order.
//!
//! `append` and `read_all` perform blocking file I/O on the calling
//! thread. Callers that need non-blocking behavior must run them on a
//! worker thread; the store has no internal queue or batching.

use ailog_core::{Clock, LogEntry, SystemClock};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the storage medium beneath the log.
///
/// Never escapes [`ActivityLog::append`]: a failed write is logged to the
/// diagnostic channel and swallowed so the caller's workflow continues.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only record sink with synchronous read-back.
#[derive(Debug, Clone)]
pub struct ActivityLog<C: Clock = SystemClock> {
    dir: PathBuf,
    clock: C,
}

impl ActivityLog<SystemClock> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, SystemClock)
    }
}

impl<C: Clock> ActivityLog<C> {
    pub fn with_clock(dir: impl Into<PathBuf>, clock: C) -> Self {
        Self { dir: dir.into(), clock }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append one fully-formed entry to today's partition.
    ///
    /// A storage failure (disk full, permission denied) is logged and
    /// treated as a no-op; it never interrupts the caller. Each append is
    /// a single write of one line, so concurrent appends from the same
    /// process may interleave at line granularity but not within a line.
    pub fn append(&self, entry: &LogEntry) {
        if let Err(e) = self.try_append(entry) {
            tracing::error!(
                dir = %self.dir.display(),
                error = %e,
                "failed to append activity log entry"
            );
        }
    }

    fn try_append(&self, entry: &LogEntry) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let path = self.partition_path();
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Partition file for the current *write* time. The entry timestamp
    /// can differ when an append is delayed.
    fn partition_path(&self) -> PathBuf {
        let date = self.clock.now().format("%Y-%m-%d");
        self.dir.join(format!("activity-{date}.jsonl"))
    }

    /// Read back all entries, oldest partition first, optionally filtered
    /// to entries whose `timestamp` falls in `[start, end]` inclusive.
    ///
    /// Malformed lines and unreadable partitions are skipped with a
    /// warning; the read returns everything that parsed. A read running
    /// concurrently with writes may or may not see the latest lines.
    pub fn read_all(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<LogEntry> {
        let mut entries = Vec::new();

        for path in self.partition_files() {
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable log partition"
                    );
                    continue;
                }
            };

            for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                let entry: LogEntry = match serde_json::from_str(line) {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "skipping malformed log line"
                        );
                        continue;
                    }
                };

                if let Some(start) = start {
                    if entry.timestamp < start {
                        continue;
                    }
                }
                if let Some(end) = end {
                    if entry.timestamp > end {
                        continue;
                    }
                }
                entries.push(entry);
            }
        }

        entries
    }

    /// Partition files in lexical (= chronological) filename order.
    fn partition_files(&self) -> Vec<PathBuf> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            // Missing directory means nothing was ever logged
            Err(_) => return Vec::new(),
        };

        let mut files: Vec<PathBuf> = read_dir
            .filter_map(|res| res.ok())
            .map(|dirent| dirent.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("activity-") && name.ends_with(".jsonl"))
            })
            .collect();
        files.sort();
        files
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
