//! Tag encoders
//!
//! Two implementations behind one trait: an HTTP client for an
//! OpenAI-compatible `/v1/embeddings` backend, and a deterministic
//! feature-hashing encoder that needs no external process. The process-wide
//! encoder handle is initialized lazily, at most once, and is read-only
//! afterwards.

use crate::config::Config;
use crate::error::{RecommenderError, Result};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, info};

/// Fixed keys so hashed embeddings stay stable across runs and Rust versions
const HASH_SEED_K0: u64 = 0x8f3a_1c45_a2b7_6d09;
const HASH_SEED_K1: u64 = 0x51e2_90cd_74f8_3b16;

static SHARED_ENCODER: OnceCell<Arc<dyn TagEncoder>> = OnceCell::new();

#[async_trait]
pub trait TagEncoder: Send + Sync {
    /// Native dimensionality of every vector this encoder produces
    fn dimension(&self) -> usize;

    /// Encode each text independently, one vector per input
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// The process-wide encoder. The first caller pays the construction cost;
/// racing callers all observe the same instance.
pub fn shared_encoder(config: &Config) -> Arc<dyn TagEncoder> {
    SHARED_ENCODER.get_or_init(|| build_encoder(config)).clone()
}

pub fn build_encoder(config: &Config) -> Arc<dyn TagEncoder> {
    match &config.embeddings_url {
        Some(url) => {
            info!("Encoder backend: {} (dim {})", url, config.embedding_dim);
            Arc::new(HttpTagEncoder::new(url.clone(), config.embedding_dim))
        }
        None => {
            info!("Encoder backend: feature hashing (dim {})", config.embedding_dim);
            Arc::new(HashTagEncoder::new(config.embedding_dim))
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Encoder backed by an OpenAI-compatible embeddings endpoint.
pub struct HttpTagEncoder {
    backend_url: String,
    dimension: usize,
    http_client: reqwest::Client,
}

impl HttpTagEncoder {
    pub fn new(backend_url: String, dimension: usize) -> Self {
        Self {
            backend_url,
            dimension,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.backend_url)
    }
}

#[async_trait]
impl TagEncoder for HttpTagEncoder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Encoding {} text(s) via embeddings backend", texts.len());
        let request = EmbeddingRequest {
            model: "tag-embedding".to_string(),
            input: texts.to_vec(),
        };
        let response = self
            .http_client
            .post(self.embeddings_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| RecommenderError::ExternalService(format!("embedding request failed: {}", e)))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RecommenderError::ExternalService(format!(
                "embedding endpoint returned {}: {}",
                status, body
            )));
        }
        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RecommenderError::ExternalService(format!("failed to parse embedding response: {}", e)))?;
        let vectors: Vec<Vec<f32>> = embedding_response
            .data
            .into_iter()
            .map(|d| d.embedding)
            .collect();
        if vectors.len() != texts.len() {
            return Err(RecommenderError::ExternalService(format!(
                "embedding backend returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }
}

/// Deterministic feature-hashing encoder: tokens hashed into dimension
/// indices with SipHash13 and fixed seeds, sign-hashed accumulation,
/// L2 normalization. Cheap, offline, and stable for identical input.
pub struct HashTagEncoder {
    dimension: usize,
}

impl HashTagEncoder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in text.split_whitespace() {
            let idx = self.hash_token(token);
            let sign = if self.hash_token(&format!("{}_sign", token)) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl TagEncoder for HashTagEncoder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_encoder_is_deterministic() {
        let encoder = HashTagEncoder::new(64);
        let texts = vec!["redes neuronales".to_string(), "ia".to_string()];

        let first = encoder.encode(&texts).await.unwrap();
        let second = encoder.encode(&texts).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|v| v.len() == 64));
    }

    #[tokio::test]
    async fn test_hash_encoder_vectors_are_unit_length() {
        let encoder = HashTagEncoder::new(128);

        let vectors = encoder.encode(&["seguridad informatica".to_string()]).await.unwrap();
        let norm: f32 = vectors[0].iter().map(|x| x * x).sum::<f32>().sqrt();

        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_hash_encoder_distinguishes_texts() {
        let encoder = HashTagEncoder::new(256);

        let vectors = encoder
            .encode(&["ia".to_string(), "seguridad".to_string()])
            .await
            .unwrap();

        assert_ne!(vectors[0], vectors[1]);
    }

    #[tokio::test]
    async fn test_http_encoder_parses_backend_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/embeddings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"embedding":[1.0,0.0]},{"embedding":[0.0,1.0]}]}"#)
            .create_async()
            .await;

        let encoder = HttpTagEncoder::new(server.url(), 2);
        let vectors = encoder
            .encode(&["ia".to_string(), "redes".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_http_encoder_surfaces_backend_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/embeddings")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let encoder = HttpTagEncoder::new(server.url(), 2);
        let err = encoder.encode(&["ia".to_string()]).await.unwrap_err();

        assert!(matches!(err, RecommenderError::ExternalService(_)));
    }
}
