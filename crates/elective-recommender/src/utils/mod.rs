//! Utilities module - Text cleaning shared by the tag pipeline

pub mod text_normalizer;

// Re-export commonly used utilities
pub use text_normalizer::normalize;
