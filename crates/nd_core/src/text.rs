/// Upper bound on summarizer input, in characters.
pub const MAX_SUMMARY_INPUT_CHARS: usize = 4000;

/// Trim and hard-cap text before it reaches the summarizer. The cut is a
/// plain character truncation with no sentence-boundary awareness.
/// Empty or whitespace-only input comes back as an empty string; callers
/// short-circuit before invoking the model in that case.
pub fn normalize_for_summary(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX_SUMMARY_INPUT_CHARS) {
        Some((idx, _)) => trimmed[..idx].to_string(),
        None => trimmed.to_string(),
    }
}
