//! Tag extraction and assembly
//!
//! Derives a bounded, deterministic tag sequence for each entity:
//! - courses: up to 3 LLM-suggested tags first, then lemmas extracted from
//!   the description, truncated to `max_tags`
//! - students: lemmatized declared interests unioned with lemmas extracted
//!   from the free-text description, sorted
//!
//! Extracted tags are always sorted lexicographically before truncation.
//! That keeps the output stable across runs but it also means truncation
//! drops tags alphabetically, not by relevance — a known limitation kept
//! for determinism.

use crate::tags::lemmatizer::{lemmatize_phrase, lemmatize_word, looks_like_topic_token};
use crate::tags::suggester::TagSuggester;
use crate::utils::text_normalizer::normalize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// How many tags the LLM suggester is asked for per course
const AI_TAG_COUNT: usize = 3;

/// Extract up to `max_tags` topic lemmas from free text: normalize,
/// tokenize, drop stop words and non-topic tokens, lemmatize, dedup,
/// sort, truncate.
pub fn extract_tags(text: &str, max_tags: usize) -> Vec<String> {
    let normalized = normalize(text);
    let mut lemmas = BTreeSet::new();

    for token in normalized.split_whitespace() {
        if !looks_like_topic_token(token) {
            continue;
        }
        let lemma = lemmatize_word(token);
        if lemma.len() >= 2 && looks_like_topic_token(&lemma) {
            lemmas.insert(lemma);
        }
    }

    let mut tags: Vec<String> = lemmas.into_iter().collect();
    tags.truncate(max_tags);
    tags
}

/// Assembles per-entity tag sequences, delegating AI suggestion to the
/// injected collaborator.
pub struct TagExtractor {
    suggester: Arc<dyn TagSuggester>,
}

impl TagExtractor {
    pub fn new(suggester: Arc<dyn TagSuggester>) -> Self {
        Self { suggester }
    }

    /// Course tags: AI-suggested tags first (order preserved, deduped),
    /// then extracted lemmas not already present, truncated to `max_tags`.
    /// A failed suggestion call yields no AI tags and extraction proceeds
    /// alone; registration never aborts because of the suggester.
    pub async fn assemble_course_tags(
        &self,
        description: &str,
        name: &str,
        max_tags: usize,
        use_ai: bool,
    ) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();

        if use_ai {
            let suggested = self
                .suggester
                .suggest_tags(description, Some(name), AI_TAG_COUNT)
                .await;
            debug!("Suggester returned {} tag(s) for course '{}'", suggested.len(), name);
            for tag in suggested {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }

        for tag in extract_tags(description, max_tags) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        tags.truncate(max_tags);
        tags
    }

    /// Student tags: declared interests split on comma and lemmatized
    /// phrase-by-phrase, unioned with up to `max_tags` lemmas from the
    /// free-text description. The union is re-normalized and sorted; it is
    /// not truncated.
    pub fn assemble_student_tags(
        &self,
        declared_tags_text: &str,
        free_text: &str,
        max_tags: usize,
    ) -> Vec<String> {
        let mut combined = BTreeSet::new();

        for declared in declared_tags_text.split(',') {
            let declared = declared.trim();
            if declared.is_empty() {
                continue;
            }
            let lemma = lemmatize_phrase(declared);
            if !lemma.is_empty() {
                combined.insert(lemma);
            }
        }

        for tag in extract_tags(free_text, max_tags) {
            combined.insert(tag);
        }

        // Final pass through the normalizer; BTreeSet keeps the sort contract
        combined
            .into_iter()
            .map(|tag| normalize(&tag))
            .filter(|tag| !tag.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::suggester::NullTagSuggester;

    struct FixedSuggester(Vec<String>);

    #[async_trait::async_trait]
    impl TagSuggester for FixedSuggester {
        async fn suggest_tags(&self, _description: &str, _name: Option<&str>, n: usize) -> Vec<String> {
            self.0.iter().take(n).cloned().collect()
        }
    }

    #[test]
    fn test_extract_tags_sorted_and_deduped() {
        let tags = extract_tags("Redes neuronales y redes de datos para seguridad", 10);

        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"red".to_string()));
        assert!(tags.contains(&"seguridad".to_string()));
        assert!(!tags.iter().any(|t| t == "de" || t == "y" || t == "para"));
    }

    #[test]
    fn test_extract_tags_truncates_after_sort() {
        let tags = extract_tags("zorro base criptografia datos algoritmo", 2);

        // Lexicographic head of the lemma set, not the first words seen
        assert_eq!(tags, vec!["algoritmo".to_string(), "base".to_string()]);
    }

    #[test]
    fn test_extract_tags_empty_input() {
        assert!(extract_tags("", 5).is_empty());
        assert!(extract_tags("de la y en", 5).is_empty());
    }

    #[tokio::test]
    async fn test_course_tags_ai_first_then_extracted() {
        let extractor = TagExtractor::new(Arc::new(FixedSuggester(vec![
            "vision artificial".into(),
            "robotica".into(),
        ])));

        let tags = extractor
            .assemble_course_tags("curso de robotica y sensores", "Robotica", 10, true)
            .await;

        assert_eq!(tags[0], "vision artificial");
        assert_eq!(tags[1], "robotica");
        // extracted lemmas follow, minus ones the suggester already produced
        assert!(tags.contains(&"sensor".to_string()) || tags.contains(&"sensores".to_string()));
        assert_eq!(tags.iter().filter(|t| t.as_str() == "robotica").count(), 1);
    }

    #[tokio::test]
    async fn test_course_tags_without_ai() {
        let extractor = TagExtractor::new(Arc::new(NullTagSuggester));

        let tags = extractor
            .assemble_course_tags("Introducción a bases de datos", "Optativa A", 10, false)
            .await;

        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"base".to_string()));
        assert!(tags.contains(&"dato".to_string()));
    }

    #[tokio::test]
    async fn test_course_tags_respect_max() {
        let extractor = TagExtractor::new(Arc::new(NullTagSuggester));

        let tags = extractor
            .assemble_course_tags(
                "algoritmos estructuras grafos arboles listas pilas colas montones conjuntos mapas vectores",
                "Estructuras",
                4,
                false,
            )
            .await;

        assert_eq!(tags.len(), 4);
    }

    #[test]
    fn test_student_tags_union_declared_and_extracted() {
        let extractor = TagExtractor::new(Arc::new(NullTagSuggester));

        let tags = extractor.assemble_student_tags(
            "Bases de Datos, IA",
            "me interesa la seguridad",
            10,
        );

        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"base de dato".to_string()));
        assert!(tags.contains(&"ia".to_string()));
        assert!(tags.contains(&"seguridad".to_string()));
    }

    #[test]
    fn test_student_tags_empty_inputs() {
        let extractor = TagExtractor::new(Arc::new(NullTagSuggester));

        assert!(extractor.assemble_student_tags("", "", 10).is_empty());
        assert!(extractor.assemble_student_tags(" , , ", "  ", 10).is_empty());
    }
}
