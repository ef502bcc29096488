//! Persisted embedding tables with coherence-checked refresh
//!
//! One binary table per entity type, `{id, tags, vector}` rows serialized
//! with bincode and rewritten whole. The invalidation policy is
//! all-or-nothing on purpose: if any row's id or tag string differs from
//! the persisted table (compared positionally, byte-for-byte), every row is
//! recomputed and the file rewritten. The store can therefore never be
//! stale, at the cost of recomputing unchanged rows.

use crate::embeddings::encoder::TagEncoder;
use crate::error::Result;
use crate::storage::tag_table::{split_tags, TagRow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingRecord {
    pub id: u32,
    /// Tag string exactly as stored in the tag side-table; compared
    /// byte-for-byte during the coherence check
    pub tags: String,
    pub vector: Vec<f32>,
}

pub struct EmbeddingStore {
    encoder: Arc<dyn TagEncoder>,
}

impl EmbeddingStore {
    pub fn new(encoder: Arc<dyn TagEncoder>) -> Self {
        Self { encoder }
    }

    /// Average embedding of a tag set: each tag encoded independently, then
    /// the element-wise mean. An empty tag set maps to the zero vector of
    /// the encoder's dimensionality.
    pub async fn embed_tags(&self, tags: &[String]) -> Result<Vec<f32>> {
        let dimension = self.encoder.dimension();
        if tags.is_empty() {
            return Ok(vec![0.0; dimension]);
        }
        let vectors = self.encoder.encode(tags).await?;
        let mut mean = vec![0.0f32; dimension];
        for vector in &vectors {
            for (slot, value) in mean.iter_mut().zip(vector.iter()) {
                *slot += value;
            }
        }
        let count = vectors.len() as f32;
        for slot in &mut mean {
            *slot /= count;
        }
        Ok(mean)
    }

    /// Load a persisted table. A missing, unreadable or corrupt file is
    /// treated as absent (the caller recomputes), never as a fatal error.
    pub fn load(path: &Path) -> Option<Vec<EmbeddingRecord>> {
        if !path.exists() {
            return None;
        }
        match std::fs::read(path) {
            Ok(bytes) => match bincode::deserialize(&bytes) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!("Embedding table {} is corrupt ({}), treating as absent", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Could not read embedding table {} ({}), treating as absent", path.display(), e);
                None
            }
        }
    }

    /// Whole-table rewrite, atomic via temp file + rename.
    fn save(path: &Path, records: &[EmbeddingRecord]) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = bincode::serialize(records)?;
        let tmp_path = path.with_extension("bin.tmp");
        std::fs::write(&tmp_path, bytes)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Return the persisted table when it matches `current_rows` exactly
    /// (same length, same ids, same tag strings, in the same order);
    /// otherwise recompute embeddings for every row and overwrite the file.
    pub async fn refresh_if_needed(
        &self,
        current_rows: &[TagRow],
        path: &Path,
    ) -> Result<Vec<EmbeddingRecord>> {
        if let Some(existing) = Self::load(path) {
            let coherent = existing.len() == current_rows.len()
                && existing
                    .iter()
                    .zip(current_rows.iter())
                    .all(|(record, row)| record.id == row.id && record.tags == row.tags);
            if coherent {
                debug!("Embedding table {} is coherent ({} rows)", path.display(), existing.len());
                return Ok(existing);
            }
        }

        info!(
            "Recomputing embedding table {} ({} rows)",
            path.display(),
            current_rows.len()
        );
        let mut records = Vec::with_capacity(current_rows.len());
        for row in current_rows {
            let tags = split_tags(&row.tags);
            let vector = self.embed_tags(&tags).await?;
            records.push(EmbeddingRecord {
                id: row.id,
                tags: row.tags.clone(),
                vector,
            });
        }
        Self::save(path, &records)?;
        Ok(records)
    }
}
