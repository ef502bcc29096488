//! Course ranking for a single student
//!
//! Ranks every course by cosine similarity to the student's embedding.
//! The caller is responsible for having refreshed both embedding tables
//! first; this module only ranks what it is given.

use crate::embeddings::store::EmbeddingRecord;
use crate::error::Result;
use crate::similarity::similarity_to_all_courses;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub course_id: u32,
    pub score: f32,
}

/// Top `n` courses for a student: descending score, ties broken by
/// ascending course id so the ranking is fully deterministic.
pub fn top_n(
    student_id: u32,
    n: usize,
    students: &[EmbeddingRecord],
    courses: &[EmbeddingRecord],
) -> Result<Vec<Recommendation>> {
    let mut scored = similarity_to_all_courses(student_id, students, courses)?;
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(n);
    Ok(scored
        .into_iter()
        .map(|(course_id, score)| Recommendation { course_id, score })
        .collect())
}
