use serde::Serialize;

/// Label used when a log carries no model or provider information.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Token counts for one session, or the running total over many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_tokens: u64,
    pub cache_read_tokens: u64,
    pub reasoning_tokens: u64,
    pub model: String,
    pub provider: String,
}

impl Default for TokenUsage {
    fn default() -> Self {
        Self {
            input_tokens: 0,
            output_tokens: 0,
            cache_creation_tokens: 0,
            cache_read_tokens: 0,
            reasoning_tokens: 0,
            model: UNKNOWN_LABEL.to_string(),
            provider: UNKNOWN_LABEL.to_string(),
        }
    }
}

impl TokenUsage {
    pub fn with_provider(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            ..Self::default()
        }
    }

    /// Cache creation plus cache read.
    pub fn cache_tokens(&self) -> u64 {
        self.cache_creation_tokens
            .saturating_add(self.cache_read_tokens)
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cache_tokens())
            .saturating_add(self.reasoning_tokens)
    }

    /// Tokens that required fresh computation: everything except cache reads.
    pub fn compute_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.reasoning_tokens)
            .saturating_add(self.cache_creation_tokens)
    }

    /// Add only the numeric counters of `other`; labels are left untouched.
    pub fn add_counts(&mut self, other: &TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
        self.cache_creation_tokens = self
            .cache_creation_tokens
            .saturating_add(other.cache_creation_tokens);
        self.cache_read_tokens = self
            .cache_read_tokens
            .saturating_add(other.cache_read_tokens);
        self.reasoning_tokens = self.reasoning_tokens.saturating_add(other.reasoning_tokens);
    }
}

/// Final energy report derived from an aggregated [`TokenUsage`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyResult {
    pub total_tokens: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_tokens: u64,
    pub reasoning_tokens: u64,
    pub energy_wh: f64,
    pub co2_grams: f64,
    pub tree_days: f64,
    pub model: String,
    pub provider: String,
}
