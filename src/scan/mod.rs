//! # Scan Module
//!
//! Walks each supported tool's log directory and turns its records into
//! [`SessionInfo`] values.
//!
//! ## Failure contract
//!
//! - `Scanner::try_scan` reports a missing or unwalkable root as a [`ScanError`]
//! - `Scanner::scan` never fails: root-level errors are logged at debug level
//!   and yield an empty list
//! - Unreadable files and malformed records are skipped by both
//!
//! Sessions come back sorted by `last_modified`, newest first.

mod claude;
mod opencode;

pub use claude::ClaudeScanner;
pub use opencode::OpenCodeScanner;

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ScanError, ScanResult};
use crate::models::{SessionInfo, Source, SourceCounts, TokenUsage};

/// A log reader for one supported tool
pub trait Scanner {
    fn source(&self) -> Source;

    /// Directory the scanner reads from
    fn root(&self) -> &Path;

    /// Scan the root, surfacing root-level failures.
    fn try_scan(&self) -> ScanResult<Vec<SessionInfo>>;

    /// Scan the root; any failure yields an empty list.
    fn scan(&self) -> Vec<SessionInfo> {
        match self.try_scan() {
            Ok(mut sessions) => {
                sort_by_recency(&mut sessions);
                tracing::debug!(
                    source = %self.source(),
                    sessions = sessions.len(),
                    "scan finished"
                );
                sessions
            }
            Err(err) => {
                tracing::debug!(source = %self.source(), error = %err, "scan yielded nothing");
                Vec::new()
            }
        }
    }
}

/// Sessions from every enabled source
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Newest first, across all sources
    pub sessions: Vec<SessionInfo>,
    pub counts: SourceCounts,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn usages(&self) -> impl Iterator<Item = &TokenUsage> {
        self.sessions.iter().map(|s| &s.usage)
    }
}

/// Run every scanner and merge their sessions.
pub fn scan_sources(scanners: &[&dyn Scanner]) -> ScanReport {
    let mut report = ScanReport::default();
    for scanner in scanners {
        for session in scanner.scan() {
            report.counts.record(session.source);
            report.sessions.push(session);
        }
    }
    sort_by_recency(&mut report.sessions);
    report
}

pub(crate) fn sort_by_recency(sessions: &mut [SessionInfo]) {
    sessions.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
}

/// All regular files below `root` with the given extension, in file-name order.
pub(crate) fn collect_files(root: &Path, extension: &str) -> ScanResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ScanError::RootMissing(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) if err.depth() == 0 => {
                return Err(ScanError::Walk {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub(crate) fn file_mtime(path: &Path) -> ScanResult<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })
}
