//! Per-entity tag side-tables
//!
//! One row per entity, `{id, tags}` with tags comma-joined. Rows are
//! written per-id: updating one entity leaves every other row untouched,
//! which is what keeps unrelated embeddings valid across single-entity
//! edits. Row order is stable (existing order preserved, new ids appended)
//! because the embedding coherence check compares rows positionally.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagRow {
    #[serde(rename = "ID")]
    pub id: u32,
    #[serde(rename = "Tags")]
    pub tags: String,
}

/// Join a tag sequence into its canonical string form. This exact string is
/// what the embedding store compares byte-for-byte.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Split a stored tag string back into a list. Accepts semicolons as well
/// for tolerance with hand-edited files.
pub fn split_tags(joined: &str) -> Vec<String> {
    let separator = if joined.contains(';') { ';' } else { ',' };
    joined
        .split(separator)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct TagTable {
    path: PathBuf,
}

impl TagTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the tag string for `id`, appending a new row when the id is
    /// not present yet. Every other row keeps its content and position.
    pub fn upsert(&self, id: u32, tags: &str) -> Result<()> {
        let mut rows = self.rows()?;
        match rows.iter_mut().find(|r| r.id == id) {
            Some(row) => row.tags = tags.to_string(),
            None => rows.push(TagRow {
                id,
                tags: tags.to_string(),
            }),
        }
        self.write_all(&rows)
    }

    pub fn rows(&self) -> Result<Vec<TagRow>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    fn write_all(&self, rows: &[TagRow]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_appends_then_replaces() {
        let dir = TempDir::new().unwrap();
        let table = TagTable::new(dir.path().join("tags.csv"));

        table.upsert(1, "ia, redes").unwrap();
        table.upsert(2, "seguridad").unwrap();
        table.upsert(1, "ia, red, dato").unwrap();

        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].tags, "ia, red, dato");
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].tags, "seguridad");
    }

    #[test]
    fn test_upsert_preserves_row_order() {
        let dir = TempDir::new().unwrap();
        let table = TagTable::new(dir.path().join("tags.csv"));

        for id in [3, 1, 2] {
            table.upsert(id, "x").unwrap();
        }
        table.upsert(1, "y").unwrap();

        let ids: Vec<u32> = table.rows().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_join_and_split_tags() {
        let tags = vec!["ia".to_string(), "red neuronal".to_string()];
        let joined = join_tags(&tags);

        assert_eq!(joined, "ia, red neuronal");
        assert_eq!(split_tags(&joined), tags);
        assert_eq!(split_tags("a; b ;c"), vec!["a", "b", "c"]);
        assert!(split_tags("  ,, ").is_empty());
    }
}
