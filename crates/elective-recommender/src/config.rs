// elective-recommender/crates/elective-recommender/src/config.rs

use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Runtime configuration, loaded once from the environment.
///
/// Read-only after construction; every component borrows from the same
/// instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the CSV stores, tag side-tables and embedding tables
    pub data_dir: PathBuf,
    /// Upper bound on extracted tags per entity
    pub max_tags: usize,
    /// Whether course registration asks the LLM suggester for tags
    pub use_ai_tags: bool,
    /// Chat-completions endpoint used for tag suggestion
    pub suggester_url: String,
    /// Model identifier sent with each suggestion request
    pub suggester_model: String,
    /// Bearer token for the suggestion endpoint, if required
    pub suggester_api_key: Option<String>,
    /// Wall-clock bound on a single suggestion call
    pub suggester_timeout_seconds: u64,
    /// Base URL of an embeddings backend; when unset the deterministic
    /// feature-hashing encoder is used instead
    pub embeddings_url: Option<String>,
    /// Native dimensionality of embedding vectors
    pub embedding_dim: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            warn!("Failed to load .env file: {}. Using system environment variables.", e);
        } else {
            info!("Loaded environment variables from .env file");
        }

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".into()));

        let max_tags = env::var("MAX_TAGS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .unwrap_or(10);

        let use_ai_tags = matches!(
            env::var("USE_AI_TAGS").unwrap_or_else(|_| "false".into()).as_str(),
            "1" | "true" | "yes"
        );

        let suggester_api_key = env::var("OPENROUTER_API_KEY").ok();
        if use_ai_tags && suggester_api_key.is_none() {
            warn!("USE_AI_TAGS is enabled but OPENROUTER_API_KEY is not set; suggestion calls may be rejected");
        }

        let embeddings_url = env::var("EMBEDDINGS_URL").ok();
        match &embeddings_url {
            Some(url) => info!("Using embeddings backend: {}", url),
            None => info!("EMBEDDINGS_URL not set, using deterministic hashing encoder"),
        }

        let config = Self {
            data_dir,
            max_tags,
            use_ai_tags,
            suggester_url: env::var("TAG_SUGGESTER_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".into()),
            suggester_model: env::var("TAG_SUGGESTER_MODEL")
                .unwrap_or_else(|_| "mistralai/mistral-7b-instruct:free".into()),
            suggester_api_key,
            suggester_timeout_seconds: env::var("TAG_SUGGEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
            embeddings_url,
            embedding_dim: env::var("EMBEDDING_DIM")
                .unwrap_or_else(|_| "512".into())
                .parse()
                .unwrap_or(512),
        };

        info!(
            "Configuration: data dir {:?}, max {} tags, AI tags {}, embedding dim {}",
            config.data_dir, config.max_tags, config.use_ai_tags, config.embedding_dim
        );

        Ok(config)
    }

    // ── Paths of the backing files inside the data directory ──

    pub fn courses_csv(&self) -> PathBuf {
        self.data_dir.join("courses.csv")
    }

    pub fn students_csv(&self) -> PathBuf {
        self.data_dir.join("students.csv")
    }

    pub fn course_tags_csv(&self) -> PathBuf {
        self.data_dir.join("courses_with_tags.csv")
    }

    pub fn student_tags_csv(&self) -> PathBuf {
        self.data_dir.join("students_with_tags.csv")
    }

    pub fn course_embeddings_path(&self) -> PathBuf {
        self.data_dir.join("courses_tags_embeddings.bin")
    }

    pub fn student_embeddings_path(&self) -> PathBuf {
        self.data_dir.join("students_tags_embeddings.bin")
    }

    pub fn predefined_tags_path(&self) -> PathBuf {
        self.data_dir.join("predefined_tags.txt")
    }

    /// Config rooted at an arbitrary data directory, with defaults everywhere
    /// else. Used by tests and embedding callers that manage their own env.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            max_tags: 10,
            use_ai_tags: false,
            suggester_url: "https://openrouter.ai/api/v1/chat/completions".into(),
            suggester_model: "mistralai/mistral-7b-instruct:free".into(),
            suggester_api_key: None,
            suggester_timeout_seconds: 30,
            embeddings_url: None,
            embedding_dim: 512,
        }
    }
}
