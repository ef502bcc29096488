//! Predefined interest vocabulary
//!
//! A static list of interest tags loaded once at startup, used by the
//! presentation layer to constrain its interest selector. The core pipeline
//! does not enforce membership.

use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct TagVocabulary {
    tags: Vec<String>,
}

impl TagVocabulary {
    /// Load from a plain-text file, one tag per line. Blank lines and lines
    /// starting with `#` are skipped. A missing file yields an empty
    /// vocabulary with a warning.
    pub fn load(path: &Path) -> Self {
        let tags = match std::fs::read_to_string(path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!("Predefined tags file {} unavailable ({}), vocabulary is empty", path.display(), e);
                Vec::new()
            }
        };
        info!("Loaded {} predefined tag(s)", tags.len());
        Self { tags }
    }

    pub fn empty() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_skips_comments_and_blanks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("predefined_tags.txt");
        std::fs::write(&path, "# interests\nia\n\nredes\n  seguridad  \n").unwrap();

        let vocabulary = TagVocabulary::load(&path);

        assert_eq!(vocabulary.tags(), &["ia", "redes", "seguridad"]);
        assert!(vocabulary.contains("redes"));
        assert!(!vocabulary.contains("cocina"));
    }

    #[test]
    fn test_missing_file_is_empty_vocabulary() {
        let dir = TempDir::new().unwrap();

        let vocabulary = TagVocabulary::load(&dir.path().join("nope.txt"));

        assert!(vocabulary.tags().is_empty());
    }
}
