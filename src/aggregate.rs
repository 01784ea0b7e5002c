//! Cross-session reduction of token usage

use crate::models::{TokenUsage, UNKNOWN_LABEL};

fn is_informative(label: &str) -> bool {
    !label.is_empty() && label != UNKNOWN_LABEL
}

/// Sum token usages into one.
///
/// The counters are a plain sum, so their totals do not depend on input
/// order. `model` and `provider` are the last informative (non-empty,
/// non-`"unknown"`) labels seen while folding left to right, which does
/// depend on order; callers pass sessions newest first.
pub fn aggregate<'a, I>(usages: I) -> TokenUsage
where
    I: IntoIterator<Item = &'a TokenUsage>,
{
    usages.into_iter().fold(TokenUsage::default(), |mut acc, u| {
        acc.add_counts(u);
        if is_informative(&u.model) {
            acc.model.clone_from(&u.model);
        }
        if is_informative(&u.provider) {
            acc.provider.clone_from(&u.provider);
        }
        acc
    })
}
