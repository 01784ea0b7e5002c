//! Normalized session records produced by the scanners

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::usage::TokenUsage;

/// Tools whose local logs can be scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    #[serde(rename = "claude-code")]
    ClaudeCode,
    #[serde(rename = "opencode")]
    OpenCode,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::ClaudeCode => "claude-code",
            Source::OpenCode => "opencode",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Source::ClaudeCode => "Claude Code",
            Source::OpenCode => "OpenCode",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scanned conversation. Only built for sessions with at least one
/// assistant turn carrying usage data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// File path (Claude Code) or session id (OpenCode)
    pub path: String,
    pub project_name: String,
    pub usage: TokenUsage,
    pub message_count: usize,
    pub last_modified: DateTime<Utc>,
    pub source: Source,
}

/// Session counts per source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCounts {
    pub claude_code: usize,
    pub opencode: usize,
}

impl SourceCounts {
    pub fn record(&mut self, source: Source) {
        match source {
            Source::ClaudeCode => self.claude_code += 1,
            Source::OpenCode => self.opencode += 1,
        }
    }

    pub fn get(&self, source: Source) -> usize {
        match source {
            Source::ClaudeCode => self.claude_code,
            Source::OpenCode => self.opencode,
        }
    }

    pub fn total(&self) -> usize {
        self.claude_code + self.opencode
    }
}
