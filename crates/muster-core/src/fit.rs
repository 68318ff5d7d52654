//! Character-budget text fitting.
//!
//! Every text role on the chart (rank label, member name, username, honorary card strip)
//! truncates by character count against a budget from [`crate::config::FitBudgets`]. The one
//! exception is the sub-group banner label, which is sized by pixel measurement in the render
//! crate so its pill wraps the text exactly.

pub const ELLIPSIS: char = '\u{2026}';

/// Fits `text` into `max_chars` display slots.
///
/// Returns `text` unchanged when its character count is within the budget. Otherwise returns
/// the first `max_chars - 2` characters followed by a single ellipsis, so the truncated
/// output occupies `max_chars - 1` slots (the ellipsis itself takes one). Budgets below 2
/// collapse to a bare ellipsis.
pub fn fit(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(2);
    let mut out: String = text.chars().take(keep).collect();
    out.push(ELLIPSIS);
    out
}
