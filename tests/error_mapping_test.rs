use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value as JsonValue;

use talent_match_backend::dto::candidate_dto::CandidateSummary;
use talent_match_backend::error::Error;

async fn body_json(response: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict_with_existing_candidate() {
    let err = Error::DuplicateEmail {
        existing: Some(CandidateSummary {
            id: 7,
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
        }),
    };

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "duplicate_email");
    assert_eq!(body["existing"]["id"], 7);
    assert_eq!(body["existing"]["email"], "jane@example.com");
}

#[tokio::test]
async fn race_lost_duplicate_maps_to_conflict_without_existing_fields() {
    let err = Error::DuplicateEmail { existing: None };

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "duplicate_email");
    assert!(body["existing"].is_null());
}

#[tokio::test]
async fn storage_unavailable_maps_to_503_with_retry_hint() {
    let err: Error = sqlx::Error::PoolTimedOut.into();
    assert!(matches!(err, Error::StorageUnavailable(_)));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn internal_errors_stay_opaque() {
    let err = Error::Internal("connection pool exploded at 03:00".into());

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "An unexpected error occurred");
}

#[tokio::test]
async fn not_found_maps_to_404() {
    let err = Error::NotFound("Candidate 42 not found".into());
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
