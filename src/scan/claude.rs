use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{Scanner, collect_files, file_mtime};
use crate::error::{ScanError, ScanResult};
use crate::models::{SessionInfo, Source, TokenUsage, TranscriptLine};
use crate::utils::{claude_project_name, claude_projects_dir};

const PROVIDER: &str = "anthropic";

/// Reads Claude Code transcripts: one `.jsonl` file per session
#[derive(Debug, Clone)]
pub struct ClaudeScanner {
    root: PathBuf,
}

impl ClaudeScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ClaudeScanner {
    /// `~/.claude/projects`
    fn default() -> Self {
        Self::new(claude_projects_dir())
    }
}

impl Scanner for ClaudeScanner {
    fn source(&self) -> Source {
        Source::ClaudeCode
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn try_scan(&self) -> ScanResult<Vec<SessionInfo>> {
        let files = collect_files(&self.root, "jsonl")?;
        let mut sessions = Vec::new();

        for path in files {
            match self.read_session(&path) {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(err) => tracing::debug!(error = %err, "skipping transcript"),
            }
        }

        Ok(sessions)
    }
}

impl ClaudeScanner {
    fn read_session(&self, path: &Path) -> ScanResult<Option<SessionInfo>> {
        let (usage, message_count) = parse_transcript(path)?;
        if message_count == 0 {
            return Ok(None);
        }
        let last_modified = file_mtime(path)?;

        Ok(Some(SessionInfo {
            path: path.to_string_lossy().into_owned(),
            project_name: claude_project_name(&self.root, path),
            usage,
            message_count,
            last_modified,
            source: Source::ClaudeCode,
        }))
    }
}

/// Sum the usage of every record in a transcript.
///
/// Each record with a `message.usage` object counts as one message. The
/// model is the last non-empty `message.model` seen. Blank, unreadable and
/// malformed lines are skipped.
pub fn parse_transcript(path: &Path) -> ScanResult<(TokenUsage, usize)> {
    let file = File::open(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut usage = TokenUsage::with_provider(PROVIDER);
    let mut message_count = 0usize;
    let mut malformed = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(source) => {
                return Err(ScanError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
        // stray invalid bytes must not cost the record its usage
        let line = String::from_utf8_lossy(&buf);
        let t = line.trim();
        if t.is_empty() {
            continue;
        }

        let parsed: TranscriptLine = match serde_json::from_str(t) {
            Ok(p) => p,
            Err(_) => {
                malformed += 1;
                continue;
            }
        };
        let Some(message) = parsed.message else {
            continue;
        };

        if let Some(u) = message.usage {
            usage.add_counts(&TokenUsage {
                input_tokens: u.input_tokens.unwrap_or(0),
                output_tokens: u.output_tokens.unwrap_or(0),
                cache_creation_tokens: u.cache_creation_input_tokens.unwrap_or(0),
                cache_read_tokens: u.cache_read_input_tokens.unwrap_or(0),
                ..Default::default()
            });
            message_count += 1;
        }
        if let Some(model) = message.model.filter(|m| !m.is_empty()) {
            usage.model = model;
        }
    }

    if malformed > 0 {
        tracing::trace!(path = %path.display(), malformed, "skipped malformed records");
    }

    Ok((usage, message_count))
}
