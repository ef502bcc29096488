//! Recommendation API - registration, editing and ranking
//!
//! Every registration or edit runs an inline recalculation for that entity:
//! normalize → assemble tags → per-id tag table update → full coherence
//! check of the embedding table. The per-id tag update is what keeps an
//! edit of one entity from invalidating everyone else's embeddings.

use crate::config::Config;
use crate::embeddings::encoder::{shared_encoder, TagEncoder};
use crate::embeddings::store::EmbeddingStore;
use crate::error::{RecommenderError, Result};
use crate::recommender::{top_n, Recommendation};
use crate::storage::csv_store::{CourseRecord, CourseStore, StudentRecord, StudentStore};
use crate::storage::tag_table::{join_tags, TagTable};
use crate::tags::extractor::TagExtractor;
use crate::tags::suggester::{HttpTagSuggester, NullTagSuggester, TagSuggester};
use crate::utils::text_normalizer::normalize;
use crate::vocabulary::TagVocabulary;
use std::sync::Arc;
use tracing::info;

pub struct RecommendationApi {
    config: Config,
    courses: CourseStore,
    students: StudentStore,
    course_tags: TagTable,
    student_tags: TagTable,
    extractor: TagExtractor,
    embeddings: EmbeddingStore,
    vocabulary: TagVocabulary,
}

impl RecommendationApi {
    /// Wire the API from configuration: HTTP suggester when AI tagging is
    /// enabled, and the process-wide shared encoder.
    pub fn new(config: Config) -> Self {
        let suggester: Arc<dyn TagSuggester> = if config.use_ai_tags {
            Arc::new(HttpTagSuggester::new(&config))
        } else {
            Arc::new(NullTagSuggester)
        };
        let encoder = shared_encoder(&config);
        Self::with_components(config, suggester, encoder)
    }

    /// Explicit wiring seam: callers (and tests) can inject their own
    /// suggester and encoder.
    pub fn with_components(
        config: Config,
        suggester: Arc<dyn TagSuggester>,
        encoder: Arc<dyn TagEncoder>,
    ) -> Self {
        let vocabulary = TagVocabulary::load(&config.predefined_tags_path());
        Self {
            courses: CourseStore::new(config.courses_csv()),
            students: StudentStore::new(config.students_csv()),
            course_tags: TagTable::new(config.course_tags_csv()),
            student_tags: TagTable::new(config.student_tags_csv()),
            extractor: TagExtractor::new(suggester),
            embeddings: EmbeddingStore::new(encoder),
            vocabulary,
            config,
        }
    }

    // ── Course operations ──

    pub async fn register_course(&self, name: &str, description: &str) -> Result<u32> {
        let id = self.courses.register(name, description)?;
        self.recalculate_course_data(id).await?;
        Ok(id)
    }

    pub async fn edit_course(
        &self,
        id: u32,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        self.courses.edit(id, name, description)?;
        self.recalculate_course_data(id).await
    }

    pub fn get_course(&self, id: u32) -> Result<CourseRecord> {
        self.courses.get(id)
    }

    pub fn get_all_courses(&self) -> Result<Vec<CourseRecord>> {
        self.courses.list()
    }

    // ── Student operations ──

    pub async fn register_student(&self, name: &str, tags: &str, description: &str) -> Result<u32> {
        let id = self.students.register(name, tags, description)?;
        self.recalculate_student_data(id).await?;
        Ok(id)
    }

    pub async fn edit_student(
        &self,
        id: u32,
        name: Option<&str>,
        tags: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        self.students.edit(id, name, tags, description)?;
        self.recalculate_student_data(id).await
    }

    pub fn get_student(&self, id: u32) -> Result<StudentRecord> {
        self.students.get(id)
    }

    pub fn get_predefined_tags(&self) -> &[String] {
        self.vocabulary.tags()
    }

    // ── Derived-data maintenance ──

    /// Recompute the tag row for one course, then run the coherence check
    /// over the whole course embedding table.
    pub async fn recalculate_course_data(&self, id: u32) -> Result<()> {
        let course = self.courses.get(id)?;
        let tags = self
            .extractor
            .assemble_course_tags(
                &normalize(&course.description),
                &normalize(&course.name),
                self.config.max_tags,
                self.config.use_ai_tags,
            )
            .await;
        info!("Course {} tagged as [{}]", id, tags.join(", "));
        self.course_tags.upsert(id, &join_tags(&tags))?;

        let rows = self.course_tags.rows()?;
        self.embeddings
            .refresh_if_needed(&rows, &self.config.course_embeddings_path())
            .await?;
        Ok(())
    }

    /// Recompute the tag row for one student, then run the coherence check
    /// over the whole student embedding table.
    pub async fn recalculate_student_data(&self, id: u32) -> Result<()> {
        let student = self.students.get(id)?;
        let tags = self.extractor.assemble_student_tags(
            &student.tags,
            &normalize(&student.description),
            self.config.max_tags,
        );
        info!("Student {} tagged as [{}]", id, tags.join(", "));
        self.student_tags.upsert(id, &join_tags(&tags))?;

        let rows = self.student_tags.rows()?;
        self.embeddings
            .refresh_if_needed(&rows, &self.config.student_embeddings_path())
            .await?;
        Ok(())
    }

    // ── Recommendation ──

    /// Top-n ranking for a student. Both embedding tables must already
    /// exist (they are written by registration/edit); their absence is a
    /// NotFound, not a trigger for recomputation here.
    pub async fn recommend_top_courses(&self, student_id: u32, n: usize) -> Result<Vec<Recommendation>> {
        let students = EmbeddingStore::load(&self.config.student_embeddings_path())
            .ok_or_else(|| RecommenderError::not_found("student embedding table"))?;
        let courses = EmbeddingStore::load(&self.config.course_embeddings_path())
            .ok_or_else(|| RecommenderError::not_found("course embedding table"))?;
        top_n(student_id, n, &students, &courses)
    }
}
