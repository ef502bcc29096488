//! Spanish lemmatization and stop-word heuristics
//!
//! Stands in for a full part-of-speech pipeline: a stop-word table plus
//! suffix rules that reduce common plural forms to their singular. Inputs
//! are expected to be normalized (lower-case, unaccented), so the tables
//! below are stored in their unaccented form.

use crate::utils::text_normalizer::normalize;
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = [
        "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las",
        "por", "un", "para", "con", "no", "una", "su", "al", "lo", "como",
        "mas", "pero", "sus", "le", "ya", "o", "este", "si", "porque", "esta",
        "entre", "cuando", "muy", "sin", "sobre", "tambien", "me", "hasta",
        "hay", "donde", "quien", "desde", "todo", "nos", "durante", "todos",
        "uno", "les", "ni", "contra", "otros", "ese", "eso", "ante", "ellos",
        "e", "esto", "mi", "antes", "algunos", "unos", "yo", "otro", "otras",
        "otra", "tanto", "esa", "estos", "mucho", "quienes", "nada", "muchos",
        "cual", "poco", "ella", "estar", "estas", "algunas", "algo",
        "nosotros", "ser", "es", "son", "era", "fue", "ha", "han", "he",
        "tiene", "tienen", "hace", "hacen", "cada", "asi", "etc", "puede",
        "pueden", "debe", "deben", "incluye", "usando", "mediante",
    ]
    .into_iter()
    .collect();
}

/// Vowels of the normalized alphabet (accents already stripped)
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Topic-token filter: the noun-leaning replacement for POS tagging.
/// Rejects stop words, bare numbers, adverbs in "-mente" and gerunds.
pub fn looks_like_topic_token(token: &str) -> bool {
    if token.len() < 2 || is_stop_word(token) {
        return false;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if token.ends_with("mente") && token.len() > 6 {
        return false;
    }
    if (token.ends_with("ando") || token.ends_with("iendo")) && token.len() > 5 {
        return false;
    }
    true
}

/// Reduce a single normalized word to its lemma via plural suffix rules:
/// "aplicaciones" → "aplicacion", "redes" → "red", "datos" → "dato".
/// Words the rules don't cover pass through unchanged.
pub fn lemmatize_word(word: &str) -> String {
    let len = word.len();
    if len <= 3 {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ciones") {
        return format!("{}cion", stem);
    }

    if len >= 5 {
        if let Some(stem) = word.strip_suffix("es") {
            if matches!(stem.chars().last(), Some('d' | 'j' | 'l' | 'n' | 'r' | 'z')) {
                return stem.to_string();
            }
        }
    }

    if let Some(stem) = word.strip_suffix('s') {
        if matches!(stem.chars().last(), Some(c) if VOWELS.contains(&c)) {
            return stem.to_string();
        }
    }

    word.to_string()
}

/// Lemmatize a possibly multi-word phrase token-by-token and rejoin with a
/// single space. The phrase is normalized first, so raw user input is fine.
pub fn lemmatize_phrase(phrase: &str) -> String {
    normalize(phrase)
        .split_whitespace()
        .map(lemmatize_word)
        .collect::<Vec<_>>()
        .join(" ")
}
