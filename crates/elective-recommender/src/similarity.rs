//! Cosine similarity between student and course embeddings
//!
//! The affinity matrix is derived data: recomputed on demand from the
//! embedding tables and never persisted.

use crate::embeddings::store::EmbeddingRecord;
use crate::error::{RecommenderError, Result};
use tracing::warn;

/// Standard cosine similarity in [-1, 1]. Similarity with a zero vector is
/// defined as 0 (an entity without tags matches nothing), and a dimension
/// mismatch degrades to 0 with a warning rather than failing.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            "embedding dimension mismatch ({} vs {}), returning zero similarity",
            a.len(),
            b.len()
        );
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Dense student × course affinity matrix
#[derive(Debug, Clone, serde::Serialize)]
pub struct AffinityMatrix {
    pub student_ids: Vec<u32>,
    pub course_ids: Vec<u32>,
    /// `scores[i][j]` = similarity of student `student_ids[i]` with course
    /// `course_ids[j]`
    pub scores: Vec<Vec<f32>>,
}

impl AffinityMatrix {
    pub fn get(&self, student_id: u32, course_id: u32) -> Option<f32> {
        let row = self.student_ids.iter().position(|id| *id == student_id)?;
        let col = self.course_ids.iter().position(|id| *id == course_id)?;
        Some(self.scores[row][col])
    }
}

/// All-pairs affinity between the two embedding tables.
pub fn pairwise_affinity(
    students: &[EmbeddingRecord],
    courses: &[EmbeddingRecord],
) -> AffinityMatrix {
    let scores = students
        .iter()
        .map(|student| {
            courses
                .iter()
                .map(|course| cosine_similarity(&student.vector, &course.vector))
                .collect()
        })
        .collect();
    AffinityMatrix {
        student_ids: students.iter().map(|s| s.id).collect(),
        course_ids: courses.iter().map(|c| c.id).collect(),
        scores,
    }
}

/// Similarity of one student against every course, in course table order.
pub fn similarity_to_all_courses(
    student_id: u32,
    students: &[EmbeddingRecord],
    courses: &[EmbeddingRecord],
) -> Result<Vec<(u32, f32)>> {
    let student = students
        .iter()
        .find(|s| s.id == student_id)
        .ok_or_else(|| RecommenderError::not_found(format!("student {} in embedding table", student_id)))?;
    Ok(courses
        .iter()
        .map(|course| (course.id, cosine_similarity(&student.vector, &course.vector)))
        .collect())
}
