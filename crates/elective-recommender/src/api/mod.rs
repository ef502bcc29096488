//! API module - The operation surface the presentation layer calls

pub mod recommendation_api;

// Re-export the facade
pub use recommendation_api::RecommendationApi;
