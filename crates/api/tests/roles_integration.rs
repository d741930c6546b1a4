//! Integration tests for the role invitation workflow.
//!
//! Covers the resolution state machine against real SQL: the guarded status
//! flip, the idempotent role insert, and who is allowed to resolve a row.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_pool, parse_body, request_as, role_count, run_migrations,
    seed_profile, seed_role, unique_email,
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn rejected_invitation_cannot_be_accepted() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let madrasa_id = Uuid::new_v4();
    let admin_id = Uuid::new_v4();
    let invitee_id = Uuid::new_v4();
    let invitee_email = unique_email();
    seed_profile(&pool, admin_id, madrasa_id, &unique_email()).await;
    seed_role(&pool, admin_id, "admin").await;
    seed_profile(&pool, invitee_id, madrasa_id, &invitee_email).await;

    let assign = request_as(
        Method::POST,
        "/api/v1/roles/assign",
        admin_id,
        madrasa_id,
        Some(json!({ "mode": "by_email", "role": "teacher", "email": invitee_email })),
    );
    let response = app.clone().oneshot(assign).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;
    assert_eq!(body["outcome"], "invited");
    let pending_id = body["id"].as_str().unwrap().to_string();

    let reject = request_as(
        Method::POST,
        &format!("/api/v1/roles/pending/{}/reject", pending_id),
        invitee_id,
        madrasa_id,
        None,
    );
    let response = app.clone().oneshot(reject).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["status"], "rejected");

    // Rejection is terminal; a later accept must not flip the row or
    // create a role binding.
    let accept = request_as(
        Method::POST,
        &format!("/api/v1/roles/pending/{}/accept", pending_id),
        invitee_id,
        madrasa_id,
        None,
    );
    let response = app.clone().oneshot(accept).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "invalid_state");

    assert_eq!(role_count(&pool, invitee_id, "teacher").await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn accept_is_limited_to_the_invitee_or_a_manager() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let madrasa_id = Uuid::new_v4();
    let admin_id = Uuid::new_v4();
    let stranger_id = Uuid::new_v4();
    let invitee_email = unique_email();
    seed_profile(&pool, admin_id, madrasa_id, &unique_email()).await;
    seed_role(&pool, admin_id, "admin").await;
    seed_profile(&pool, stranger_id, madrasa_id, &unique_email()).await;

    let assign = request_as(
        Method::POST,
        "/api/v1/roles/assign",
        admin_id,
        madrasa_id,
        Some(json!({ "mode": "by_email", "role": "admin", "email": invitee_email })),
    );
    let response = app.clone().oneshot(assign).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;
    let pending_id = body["id"].as_str().unwrap().to_string();

    // A member the row is not addressed to cannot grab the role.
    let accept = request_as(
        Method::POST,
        &format!("/api/v1/roles/pending/{}/accept", pending_id),
        stranger_id,
        madrasa_id,
        None,
    );
    let response = app.clone().oneshot(accept).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(role_count(&pool, stranger_id, "admin").await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn listing_pending_rows_requires_a_managing_role() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let madrasa_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();
    seed_profile(&pool, member_id, madrasa_id, &unique_email()).await;
    seed_role(&pool, member_id, "teacher").await;

    let list = request_as(
        Method::GET,
        "/api/v1/roles/pending",
        member_id,
        madrasa_id,
        None,
    );
    let response = app.clone().oneshot(list).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn invitee_discovers_invitation_by_account_email() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let madrasa_id = Uuid::new_v4();
    let admin_id = Uuid::new_v4();
    let invitee_email = unique_email();
    seed_profile(&pool, admin_id, madrasa_id, &unique_email()).await;
    seed_role(&pool, admin_id, "admin").await;

    // Invite before the invitee has an account.
    let assign = request_as(
        Method::POST,
        "/api/v1/roles/assign",
        admin_id,
        madrasa_id,
        Some(json!({ "mode": "by_email", "role": "teacher", "email": invitee_email })),
    );
    let response = app.clone().oneshot(assign).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The invitee signs up later and finds the invitation by email.
    let invitee_id = Uuid::new_v4();
    seed_profile(&pool, invitee_id, madrasa_id, &invitee_email).await;

    let mine = request_as(
        Method::GET,
        "/api/v1/roles/invitations",
        invitee_id,
        madrasa_id,
        None,
    );
    let response = app.clone().oneshot(mine).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    let invitations = body.as_array().unwrap();
    assert_eq!(invitations.len(), 1);
    assert_eq!(invitations[0]["email"], invitee_email.as_str());
    assert_eq!(invitations[0]["status"], "pending");
}
