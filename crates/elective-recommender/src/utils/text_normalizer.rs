//! Deterministic text normalization for Spanish course and student text
//!
//! Everything downstream (tag extraction, coherence comparison) assumes text
//! has passed through `normalize` exactly once; the function is idempotent so
//! re-normalizing already-clean text is harmless.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM_REGEX: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Lower-cases, strips Spanish accents, removes everything outside
/// `[a-z0-9\s]`, collapses whitespace runs and trims. Total: never fails,
/// empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let unaccented: String = lowered
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect();
    let stripped = NON_ALNUM_REGEX.replace_all(&unaccented, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
