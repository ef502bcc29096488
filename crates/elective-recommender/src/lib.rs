// elective-recommender/crates/elective-recommender/src/lib.rs

pub mod api;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod recommender;
pub mod similarity;
pub mod storage;
pub mod tags;
pub mod telemetry;
pub mod utils;
pub mod vocabulary;

// Public API exports
pub use api::recommendation_api::RecommendationApi;
pub use config::Config;
pub use error::{RecommenderError, Result};

// Pipeline exports
pub use embeddings::encoder::{HashTagEncoder, HttpTagEncoder, TagEncoder};
pub use embeddings::store::{EmbeddingRecord, EmbeddingStore};
pub use recommender::{top_n, Recommendation};
pub use similarity::{cosine_similarity, pairwise_affinity, AffinityMatrix};
pub use tags::extractor::{extract_tags, TagExtractor};
pub use tags::suggester::{HttpTagSuggester, NullTagSuggester, TagSuggester};
pub use utils::text_normalizer::normalize;
