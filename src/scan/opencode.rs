use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Scanner, collect_files, file_mtime};
use crate::classify::provider_for;
use crate::error::{ScanError, ScanResult};
use crate::models::{OpenCodeMessage, SessionInfo, Source, TokenUsage, UNKNOWN_LABEL};
use crate::utils::{last_path_segment, opencode_message_dir};

/// Reads OpenCode's message store: one `.json` file per message, grouped
/// into sessions by their `sessionID`
#[derive(Debug, Clone)]
pub struct OpenCodeScanner {
    root: PathBuf,
}

impl OpenCodeScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for OpenCodeScanner {
    /// `~/.local/share/opencode/storage/message`
    fn default() -> Self {
        Self::new(opencode_message_dir())
    }
}

#[derive(Debug)]
struct SessionAccum {
    usage: TokenUsage,
    message_count: usize,
    last_modified: DateTime<Utc>,
    project_path: String,
}

impl SessionAccum {
    fn new(project_path: String) -> Self {
        Self {
            usage: TokenUsage::default(),
            message_count: 0,
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            project_path,
        }
    }

    /// Fold one assistant message in. Labels follow the latest message.
    fn add(&mut self, msg: &OpenCodeMessage, modified: DateTime<Utc>) {
        if let Some(tokens) = &msg.tokens {
            let cache = tokens.cache.as_ref();
            self.usage.add_counts(&TokenUsage {
                input_tokens: tokens.input.unwrap_or(0),
                output_tokens: tokens.output.unwrap_or(0),
                reasoning_tokens: tokens.reasoning.unwrap_or(0),
                cache_creation_tokens: cache.and_then(|c| c.write).unwrap_or(0),
                cache_read_tokens: cache.and_then(|c| c.read).unwrap_or(0),
                ..Default::default()
            });
        }
        self.message_count += 1;

        let model_id = msg.model_id.as_deref().filter(|s| !s.is_empty());
        let provider_id = msg.provider_id.as_deref().filter(|s| !s.is_empty());
        if let Some(model) = model_id {
            self.usage.model = model.to_string();
        }
        if model_id.is_some() || provider_id.is_some() {
            self.usage.provider = provider_for(provider_id, model_id);
        }

        if modified > self.last_modified {
            self.last_modified = modified;
        }
    }
}

/// Parse one message file. `Ok(None)` when it is not an assistant message
/// with token data.
fn read_message(path: &Path) -> ScanResult<Option<OpenCodeMessage>> {
    let contents = fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let msg: OpenCodeMessage =
        serde_json::from_str(&contents).map_err(|source| ScanError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if msg.role.as_deref() != Some("assistant") || msg.tokens.is_none() {
        return Ok(None);
    }
    Ok(Some(msg))
}

fn project_path(msg: &OpenCodeMessage) -> String {
    msg.path
        .as_ref()
        .and_then(|p| {
            p.root
                .as_deref()
                .filter(|s| !s.is_empty())
                .or(p.cwd.as_deref().filter(|s| !s.is_empty()))
        })
        .unwrap_or(UNKNOWN_LABEL)
        .to_string()
}

impl Scanner for OpenCodeScanner {
    fn source(&self) -> Source {
        Source::OpenCode
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn try_scan(&self) -> ScanResult<Vec<SessionInfo>> {
        let files = collect_files(&self.root, "json")?;
        let mut by_session: HashMap<String, SessionAccum> = HashMap::new();

        for path in files {
            let msg = match read_message(&path) {
                Ok(Some(m)) => m,
                Ok(None) => continue,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping message");
                    continue;
                }
            };
            let modified = match file_mtime(&path) {
                Ok(t) => t,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping message");
                    continue;
                }
            };

            let session_id = msg
                .session_id
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
            by_session
                .entry(session_id)
                .or_insert_with(|| SessionAccum::new(project_path(&msg)))
                .add(&msg, modified);
        }

        let sessions = by_session
            .into_iter()
            .filter(|(_, acc)| acc.message_count > 0)
            .map(|(session_id, acc)| SessionInfo {
                path: session_id,
                project_name: last_path_segment(&acc.project_path),
                usage: acc.usage,
                message_count: acc.message_count,
                last_modified: acc.last_modified,
                source: Source::OpenCode,
            })
            .collect();

        Ok(sessions)
    }
}
