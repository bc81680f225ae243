//! Response cleanup
//!
//! Applied once per turn, after the fragment stream is exhausted.

/// Filler phrases stripped from the response, in order. Each removal
/// strips every occurrence of its phrase.
const FILLER_PHRASES: [&str; 3] = ["That's correct! ", "indeed ", " indeed"];

/// Stock reply used when cleanup leaves nothing.
pub const FALLBACK_RESPONSE: &str = "I couldn't generate a response.";

/// Reduce a raw multi-line response buffer to the final reply text.
///
/// Keeps only the first line, strips the filler phrases, trims whitespace,
/// and falls back to a stock reply when nothing remains. Pure and
/// deterministic.
// TODO: keeping only the first line truncates genuine multi-line answers.
pub fn finalize_response(raw: &str) -> String {
    let first_line = raw.lines().next().unwrap_or("");

    let mut response = first_line.to_string();
    for phrase in FILLER_PHRASES {
        response = response.replace(phrase, "");
    }

    let response = response.trim();
    if response.is_empty() {
        FALLBACK_RESPONSE.to_string()
    } else {
        response.to_string()
    }
}
