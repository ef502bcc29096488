//! Tags module - Tag derivation from free text, declared interests and LLM suggestions

pub mod extractor;
pub mod lemmatizer;
pub mod suggester;

// Re-export the main entry points
pub use extractor::{extract_tags, TagExtractor};
pub use suggester::{HttpTagSuggester, NullTagSuggester, TagSuggester};
