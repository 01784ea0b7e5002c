//! # Classify Module
//!
//! Maps free-text model and provider identifiers onto coarse categories.
//!
//! Both lookups are ordered substring tables: the first entry whose key is
//! contained in the lower-cased identifier wins. Within a model family the
//! more specific key is listed first (`gpt-4o-mini` before `gpt-4o` before
//! `gpt-4`), so reordering the tables changes results.

use serde::Serialize;
use std::fmt;

use crate::models::UNKNOWN_LABEL;

/// Coarse energy-cost bucket for a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    /// ~175B+ params (GPT-4, Opus, Gemini Ultra)
    Huge,
    /// ~70B params (Sonnet, GPT-4o, Gemini Pro)
    Large,
    /// ~20B params (Haiku, GPT-3.5, Gemini Flash)
    Medium,
    /// ~7B params
    Small,
    Unknown,
}

impl ModelCategory {
    /// Estimated Wh per token.
    ///
    /// GPT-4o is reported at ~0.34 Wh per query of 300-400 tokens and
    /// Llama3-70B on H100 at ~0.39 J/token; the buckets are spaced around
    /// those figures. `Unknown` is costed like `Large`.
    pub fn energy_per_token(&self) -> f64 {
        match self {
            ModelCategory::Huge => 0.001,
            ModelCategory::Large => 0.0003,
            ModelCategory::Medium => 0.0001,
            ModelCategory::Small => 0.00003,
            ModelCategory::Unknown => 0.0003,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelCategory::Huge => "huge",
            ModelCategory::Large => "large",
            ModelCategory::Medium => "medium",
            ModelCategory::Small => "small",
            ModelCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use ModelCategory::{Huge, Large, Medium, Small};

static MODEL_CATEGORIES: &[(&str, ModelCategory)] = &[
    // Anthropic
    ("claude-opus-4", Huge),
    ("claude-3-opus", Huge),
    ("opus", Huge),
    ("claude-sonnet-4", Large),
    ("claude-3.5-sonnet", Large),
    ("claude-3-sonnet", Large),
    ("sonnet", Large),
    ("claude-3.5-haiku", Medium),
    ("claude-3-haiku", Medium),
    ("haiku", Medium),
    // OpenAI
    ("gpt-4o-mini", Medium),
    ("gpt-4-turbo", Large),
    ("gpt-4o", Large),
    ("gpt-4", Huge),
    ("gpt-3.5-turbo", Medium),
    ("gpt-3.5", Medium),
    ("o1-preview", Huge),
    ("o1-mini", Large),
    ("o3-mini", Large),
    ("o1", Huge),
    // Google
    ("gemini-ultra", Huge),
    ("gemini-1.5-pro", Large),
    ("gemini-pro", Large),
    ("gemini-1.5-flash", Medium),
    ("gemini-2.0-flash", Medium),
    // DeepSeek
    ("deepseek-chat", Large),
    ("deepseek-coder", Large),
    ("deepseek-v3", Large),
    ("deepseek-r1", Large),
    // Zhipu
    ("glm-4.7-free", Large),
    ("glm-4.7", Large),
    ("glm-4", Large),
    ("glm-3-turbo", Medium),
    // Alibaba
    ("qwen-turbo", Medium),
    ("qwen-plus", Large),
    ("qwen-max", Huge),
    ("qwen2.5", Large),
    // Meta
    ("llama-3-70b", Large),
    ("llama-3-8b", Medium),
    ("llama-3.1", Large),
    ("llama-3.2", Large),
    ("llama-3", Large),
    ("codellama", Large),
    // Mistral
    ("mistral-large", Large),
    ("mistral-medium", Medium),
    ("mistral-small", Small),
    ("mixtral", Large),
    ("codestral", Large),
    // Cohere
    ("command-r-plus", Huge),
    ("command-r", Large),
    // xAI
    ("grok-2", Large),
    ("grok", Large),
];

/// Family hints tried when no table key matches, in priority order
static CATEGORY_FALLBACKS: &[(&[&str], ModelCategory)] = &[
    (&["opus", "ultra", "max"], Huge),
    (&["haiku", "mini", "flash", "turbo"], Medium),
    (&["sonnet", "pro", "plus"], Large),
];

/// Classify a model identifier into an energy-cost category. Never fails.
pub fn classify(model_id: &str) -> ModelCategory {
    let m = model_id.to_lowercase();

    if let Some((_, category)) = MODEL_CATEGORIES.iter().find(|(key, _)| m.contains(*key)) {
        return *category;
    }

    CATEGORY_FALLBACKS
        .iter()
        .find(|(hints, _)| hints.iter().any(|h| m.contains(*h)))
        .map(|(_, category)| *category)
        .unwrap_or(ModelCategory::Unknown)
}

static PROVIDERS: &[(&[&str], &str)] = &[
    (&["openai", "gpt", "o1"], "openai"),
    (&["anthropic", "claude"], "anthropic"),
    (&["google", "gemini"], "google"),
    (&["deepseek"], "deepseek"),
    (&["zhipu", "glm", "zai"], "zhipu"),
    (&["alibaba", "qwen"], "alibaba"),
    (&["meta", "llama"], "meta"),
    (&["mistral", "codestral"], "mistral"),
    (&["xai", "grok"], "xai"),
    (&["cohere", "command"], "cohere"),
];

/// Infer the vendor behind a provider/model pair.
///
/// Falls back to the raw provider id when nothing matches, and to
/// `"unknown"` when both inputs are absent or empty.
pub fn provider_for(provider_id: Option<&str>, model_id: Option<&str>) -> String {
    let provider_id = provider_id.filter(|s| !s.is_empty());
    let model_id = model_id.filter(|s| !s.is_empty());
    if provider_id.is_none() && model_id.is_none() {
        return UNKNOWN_LABEL.to_string();
    }

    let combined = format!(
        "{} {}",
        provider_id.unwrap_or_default(),
        model_id.unwrap_or_default()
    )
    .to_lowercase();

    PROVIDERS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| combined.contains(*n)))
        .map(|(_, provider)| provider.to_string())
        .unwrap_or_else(|| provider_id.unwrap_or(UNKNOWN_LABEL).to_string())
}

/// Glyph shown next to a provider label in the text report
pub fn provider_emoji(provider: &str) -> &'static str {
    let p = provider.to_lowercase();
    if p.contains("anthropic") || p.contains("claude") {
        "🟠"
    } else if p.contains("openai") || p.contains("gpt") {
        "🟢"
    } else if p.contains("google") || p.contains("gemini") {
        "🔵"
    } else if p.contains("deepseek") {
        "🐋"
    } else if p.contains("zhipu") || p.contains("glm") {
        "🀄"
    } else if p.contains("alibaba") || p.contains("qwen") {
        "☁️"
    } else if p.contains("meta") || p.contains("llama") {
        "🦙"
    } else if p.contains("mistral") {
        "🌬️"
    } else if p.contains("xai") || p.contains("grok") {
        "✖️"
    } else {
        "🤖"
    }
}
