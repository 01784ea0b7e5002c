use serde::Deserialize;

/// Usage block of a Claude Code assistant message
#[derive(Deserialize, Debug, Default)]
pub struct MessageUsage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub cache_creation_input_tokens: Option<u64>,
    pub cache_read_input_tokens: Option<u64>,
}

#[derive(Deserialize, Debug)]
pub struct MessageObj {
    pub usage: Option<MessageUsage>,
    pub model: Option<String>,
}

/// One line of a Claude Code JSONL transcript
#[derive(Deserialize, Debug)]
pub struct TranscriptLine {
    pub r#type: Option<String>,
    pub message: Option<MessageObj>,
}

/// Token block of an OpenCode message
#[derive(Deserialize, Debug, Default)]
pub struct OpenCodeTokens {
    pub input: Option<u64>,
    pub output: Option<u64>,
    pub reasoning: Option<u64>,
    pub cache: Option<OpenCodeCache>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OpenCodeCache {
    pub read: Option<u64>,
    pub write: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OpenCodePath {
    pub cwd: Option<String>,
    pub root: Option<String>,
}

/// One message file from OpenCode's `storage/message` tree
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpenCodeMessage {
    pub id: Option<String>,
    #[serde(rename = "sessionID")]
    pub session_id: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "modelID")]
    pub model_id: Option<String>,
    #[serde(rename = "providerID")]
    pub provider_id: Option<String>,
    pub tokens: Option<OpenCodeTokens>,
    pub path: Option<OpenCodePath>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_line_tolerates_missing_fields() {
        let line: TranscriptLine = serde_json::from_str(r#"{"type":"user"}"#).unwrap();
        assert!(line.message.is_none());

        let line: TranscriptLine = serde_json::from_str(
            r#"{"type":"assistant","message":{"model":"claude-sonnet-4","usage":{"input_tokens":5}}}"#,
        )
        .unwrap();
        let msg = line.message.unwrap();
        assert_eq!(msg.model.as_deref(), Some("claude-sonnet-4"));
        let usage = msg.usage.unwrap();
        assert_eq!(usage.input_tokens, Some(5));
        assert_eq!(usage.cache_read_input_tokens, None);
    }

    #[test]
    fn opencode_message_field_names() {
        let msg: OpenCodeMessage = serde_json::from_str(
            r#"{
                "id": "msg_1",
                "sessionID": "ses_1",
                "role": "assistant",
                "modelID": "glm-4.7-free",
                "providerID": "opencode",
                "tokens": {"input": 10, "output": 2, "reasoning": 1, "cache": {"read": 7, "write": 3}},
                "path": {"cwd": "/work/app/src", "root": "/work/app"}
            }"#,
        )
        .unwrap();
        assert_eq!(msg.session_id.as_deref(), Some("ses_1"));
        assert_eq!(msg.model_id.as_deref(), Some("glm-4.7-free"));
        assert_eq!(msg.provider_id.as_deref(), Some("opencode"));
        let tokens = msg.tokens.unwrap();
        assert_eq!(tokens.cache.unwrap().write, Some(3));
        assert_eq!(msg.path.unwrap().root.as_deref(), Some("/work/app"));
    }
}
