//! Embeddings module - Tag encoding and the persisted embedding tables

pub mod encoder;
pub mod store;

pub use encoder::{shared_encoder, HashTagEncoder, HttpTagEncoder, TagEncoder};
pub use store::{EmbeddingRecord, EmbeddingStore};
