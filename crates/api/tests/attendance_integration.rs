//! Integration tests for attendance marking.
//!
//! Exercises the natural-key upsert against real SQL: re-marking the same
//! (student, date, time slot) must update in place, never duplicate.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_pool, parse_body, request_as, run_migrations, seed_student,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn record_count(pool: &PgPool, madrasa_id: Uuid, student_id: Uuid) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM attendance WHERE madrasa_id = $1 AND student_id = $2",
    )
    .bind(madrasa_id)
    .bind(student_id)
    .fetch_one(pool)
    .await
    .expect("Failed to count attendance");
    count
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn second_mark_updates_the_existing_record() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let madrasa_id = Uuid::new_v4();
    let teacher_id = Uuid::new_v4();
    let student_id = seed_student(&pool, madrasa_id).await;

    let mark = |status: &str| {
        request_as(
            Method::POST,
            "/api/v1/attendance",
            teacher_id,
            madrasa_id,
            Some(json!({
                "student_id": student_id,
                "date": "2024-03-04",
                "time_slot": "morning",
                "status": status,
            })),
        )
    };

    let response = app.clone().oneshot(mark("present")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(mark("absent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let status = request_as(
        Method::GET,
        &format!(
            "/api/v1/attendance/status?student_id={}&date=2024-03-04&time_slot=morning",
            student_id
        ),
        teacher_id,
        madrasa_id,
        None,
    );
    let response = app.clone().oneshot(status).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["status"], "absent");

    assert_eq!(record_count(&pool, madrasa_id, student_id).await, 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn bulk_mark_overwrites_an_existing_single_mark() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let madrasa_id = Uuid::new_v4();
    let teacher_id = Uuid::new_v4();
    let student_id = seed_student(&pool, madrasa_id).await;

    let single = request_as(
        Method::POST,
        "/api/v1/attendance",
        teacher_id,
        madrasa_id,
        Some(json!({
            "student_id": student_id,
            "date": "2024-03-05",
            "time_slot": "afternoon",
            "status": "late",
        })),
    );
    let response = app.clone().oneshot(single).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bulk = request_as(
        Method::POST,
        "/api/v1/attendance/bulk",
        teacher_id,
        madrasa_id,
        Some(json!({
            "student_ids": [student_id],
            "date": "2024-03-05",
            "time_slot": "afternoon",
            "status": "present",
        })),
    );
    let response = app.clone().oneshot(bulk).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["written"], 1);

    let status = request_as(
        Method::GET,
        &format!(
            "/api/v1/attendance/status?student_id={}&date=2024-03-05&time_slot=afternoon",
            student_id
        ),
        teacher_id,
        madrasa_id,
        None,
    );
    let response = app.clone().oneshot(status).await.unwrap();
    let body = parse_body(response).await;
    assert_eq!(body["status"], "present");

    assert_eq!(record_count(&pool, madrasa_id, student_id).await, 1);
}
