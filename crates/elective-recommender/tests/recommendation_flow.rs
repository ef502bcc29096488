//! End-to-end flow: register courses and a student, then rank

use elective_recommender::{
    Config, HashTagEncoder, NullTagSuggester, RecommendationApi,
};
use std::sync::Arc;
use tempfile::TempDir;

fn api_in(dir: &TempDir) -> RecommendationApi {
    RecommendationApi::with_components(
        Config::with_data_dir(dir.path()),
        Arc::new(NullTagSuggester),
        Arc::new(HashTagEncoder::new(128)),
    )
}

#[tokio::test]
async fn student_is_recommended_the_overlapping_course_first() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    // Course 1 shares every tag with the student, course 2 only one.
    let course_ia = api
        .register_course("Optativa IA", "inteligencia artificial y redes")
        .await
        .unwrap();
    let course_sec = api
        .register_course("Optativa Seguridad", "redes y seguridad")
        .await
        .unwrap();
    let student = api
        .register_student("Ana", "artificial, inteligencia, redes", "")
        .await
        .unwrap();

    let ranking = api.recommend_top_courses(student, 1).await.unwrap();

    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].course_id, course_ia);
    assert!(ranking[0].score > 0.0);

    let full = api.recommend_top_courses(student, 10).await.unwrap();
    assert_eq!(full.len(), 2);
    assert!(full[0].score >= full[1].score);
    assert_eq!(full[1].course_id, course_sec);
}

#[tokio::test]
async fn editing_a_course_changes_the_ranking() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    let course_a = api
        .register_course("A", "historia del arte moderno")
        .await
        .unwrap();
    let course_b = api
        .register_course("B", "literatura medieval")
        .await
        .unwrap();
    let student = api
        .register_student("Luis", "criptografia", "")
        .await
        .unwrap();

    // Neither course matches yet; rewrite course B towards the student
    api.edit_course(course_b, None, Some("criptografia"))
        .await
        .unwrap();

    let ranking = api.recommend_top_courses(student, 2).await.unwrap();

    assert_eq!(ranking[0].course_id, course_b);
    assert!(ranking[0].score > ranking[1].score);
    assert_eq!(ranking[1].course_id, course_a);
}

#[tokio::test]
async fn recommendation_is_deterministic_across_api_instances() {
    let dir = TempDir::new().unwrap();

    {
        let api = api_in(&dir);
        api.register_course("A", "redes neuronales profundas").await.unwrap();
        api.register_course("B", "bases de datos distribuidas").await.unwrap();
        api.register_student("Eva", "redes", "").await.unwrap();
    }

    // A fresh API over the same data dir reuses the persisted embeddings
    let api = api_in(&dir);
    let first = api.recommend_top_courses(1, 2).await.unwrap();
    let second = api.recommend_top_courses(1, 2).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].course_id, 1);
}

#[tokio::test]
async fn unknown_student_yields_not_found() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    api.register_course("A", "redes").await.unwrap();
    api.register_student("Ana", "redes", "").await.unwrap();

    let err = api.recommend_top_courses(99, 3).await.unwrap_err();
    assert!(matches!(err, elective_recommender::RecommenderError::NotFound(_)));
}
