//! HTTP-level integration tests for the workout endpoints.
//!
//! Covers authentication enforcement, the create -> list-by-date -> edit
//! round trip, validation errors, ownership isolation, and the completion
//! lifecycle.

mod common;

use axum::http::StatusCode;
use common::{bearer_token, body_json, build_test_app, send};
use serde_json::json;
use sqlx::PgPool;

fn leg_day_doc() -> serde_json::Value {
    json!({
        "name": "Leg Day",
        "started_at": "2025-09-01T08:00:00Z",
        "exercises": [
            {
                "name": "Squat",
                "sets": [
                    { "weight": 100, "reps": 5 },
                    { "weight": 100, "reps": 5 }
                ]
            }
        ]
    })
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_requests_without_token_are_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(app, "GET", "/api/v1/workouts?date=2025-09-01", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(
        app,
        "GET",
        "/api/v1/workouts?date=2025-09-01",
        Some("not-a-real-token"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_is_public(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(app, "GET", "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ---------------------------------------------------------------------------
// Create / list / edit round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_list_and_edit_round_trip(pool: PgPool) {
    let alice = bearer_token("user_alice");

    let response = send(
        build_test_app(pool.clone()),
        "POST",
        "/api/v1/workouts",
        Some(&alice),
        Some(leg_day_doc()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().expect("id should be a string").to_string();
    assert_eq!(created["data"]["name"], "Leg Day");
    assert!(created["data"]["completed_at"].is_null());

    // The day listing returns the full aggregate.
    let response = send(
        build_test_app(pool.clone()),
        "GET",
        "/api/v1/workouts?date=2025-09-01",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let workouts = listed["data"].as_array().expect("data should be an array");
    assert_eq!(workouts.len(), 1);
    let entry = &workouts[0]["exercises"][0];
    assert_eq!(entry["exercise"]["name"], "Squat");
    assert_eq!(entry["position"], 0);
    assert_eq!(entry["sets"].as_array().unwrap().len(), 2);
    assert_eq!(entry["sets"][0]["set_number"], 1);
    assert_eq!(entry["sets"][1]["set_number"], 2);
    assert_eq!(entry["sets"][0]["reps"], 5);

    // Adjacent days list nothing.
    let response = send(
        build_test_app(pool.clone()),
        "GET",
        "/api/v1/workouts?date=2025-09-02",
        Some(&alice),
        None,
    )
    .await;
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);

    // The edit document drops positions and set numbers.
    let response = send(
        build_test_app(pool),
        "GET",
        &format!("/api/v1/workouts/{id}/edit"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let edit = body_json(response).await;
    assert_eq!(edit["data"]["name"], "Leg Day");
    assert_eq!(edit["data"]["exercises"][0]["name"], "Squat");
    assert!(edit["data"]["exercises"][0].get("position").is_none());
    assert!(edit["data"]["exercises"][0]["sets"][0].get("set_number").is_none());
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_validation_failures_short_circuit(pool: PgPool) {
    let alice = bearer_token("user_alice");

    let mut doc = leg_day_doc();
    doc["exercises"] = json!([]);
    let response = send(
        build_test_app(pool.clone()),
        "POST",
        "/api/v1/workouts",
        Some(&alice),
        Some(doc),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let mut doc = leg_day_doc();
    doc["exercises"][0]["sets"][0]["reps"] = json!(0);
    let response = send(
        build_test_app(pool.clone()),
        "POST",
        "/api/v1/workouts",
        Some(&alice),
        Some(doc),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was written.
    let response = send(
        build_test_app(pool),
        "GET",
        "/api/v1/workouts?date=2025-09-01",
        Some(&alice),
        None,
    )
    .await;
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Ownership isolation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_foreign_workout_reads_as_not_found(pool: PgPool) {
    let alice = bearer_token("user_alice");
    let bob = bearer_token("user_bob");

    let response = send(
        build_test_app(pool.clone()),
        "POST",
        "/api/v1/workouts",
        Some(&alice),
        Some(leg_day_doc()),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let as_bob = send(
        build_test_app(pool.clone()),
        "GET",
        &format!("/api/v1/workouts/{id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(as_bob.status(), StatusCode::NOT_FOUND);

    let as_alice = send(
        build_test_app(pool),
        "GET",
        &format!("/api/v1/workouts/{id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(as_alice.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Completion lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_complete_is_one_way(pool: PgPool) {
    let alice = bearer_token("user_alice");

    let response = send(
        build_test_app(pool.clone()),
        "POST",
        "/api/v1/workouts",
        Some(&alice),
        Some(leg_day_doc()),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = send(
        build_test_app(pool.clone()),
        "POST",
        &format!("/api/v1/workouts/{id}/complete"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let completed = body_json(response).await;
    assert!(!completed["data"]["completed_at"].is_null());

    // Completing twice conflicts.
    let response = send(
        build_test_app(pool.clone()),
        "POST",
        &format!("/api/v1/workouts/{id}/complete"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A replace that clears completed_at is rejected.
    let response = send(
        build_test_app(pool),
        "PUT",
        &format!("/api/v1/workouts/{id}"),
        Some(&alice),
        Some(leg_day_doc()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Replace and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_replace_swaps_composition(pool: PgPool) {
    let alice = bearer_token("user_alice");

    let response = send(
        build_test_app(pool.clone()),
        "POST",
        "/api/v1/workouts",
        Some(&alice),
        Some(leg_day_doc()),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let replacement = json!({
        "name": "Leg Day (cut short)",
        "started_at": "2025-09-01T08:00:00Z",
        "exercises": [
            { "name": "Leg Press", "sets": [ { "weight": 180, "reps": 10 } ] }
        ]
    });
    let response = send(
        build_test_app(pool.clone()),
        "PUT",
        &format!("/api/v1/workouts/{id}"),
        Some(&alice),
        Some(replacement),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["name"], "Leg Day (cut short)");
    let exercises = updated["data"]["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["exercise"]["name"], "Leg Press");

    let response = send(
        build_test_app(pool),
        "DELETE",
        &format!("/api/v1/workouts/{id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_missing_workout_is_not_found(pool: PgPool) {
    let alice = bearer_token("user_alice");
    let response = send(
        build_test_app(pool),
        "DELETE",
        "/api/v1/workouts/0192e4b2-5b1e-7cc3-a8f3-111111111111",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
