use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::dto::candidate_dto::{
    CandidateDetailResponse, CandidateSummary, RegisterCandidatePayload,
};
use crate::error::{Error, Result};
use crate::utils::request_meta::RequestMeta;
use crate::AppState;

/// Registration entry point. Validation failures return a per-field error
/// map; a submission whose email already belongs to a candidate returns the
/// existing candidate's public fields with a conflict, and the client must
/// resubmit with `candidate_id` to explicitly confirm the update.
pub async fn register_candidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegisterCandidatePayload>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    payload.check().map_err(Error::Validation)?;

    let meta = RequestMeta::from_headers(&headers);

    // Pre-flight lookup is a UX courtesy only; a concurrent first-time
    // submission can still lose the insert race and gets the same conflict.
    if payload.candidate_id.is_none() {
        if let Some(existing) = state.candidate_service.find_by_email(&payload.email).await? {
            return Err(Error::DuplicateEmail {
                existing: Some(CandidateSummary::from(&existing)),
            });
        }
    }

    let is_update = payload.candidate_id.is_some();
    let result = state
        .candidate_service
        .upsert_candidate(&payload, &meta, "candidate")
        .await
        .map_err(|e| {
            tracing::error!(email = %payload.email, error = %e, "candidate upsert failed");
            e
        })?;

    let status = if is_update {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(serde_json::to_value(result)?)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CandidateDetailResponse>> {
    let candidate = state
        .candidate_service
        .get_candidate(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;

    let technologies = state.candidate_service.technologies_for(id).await?;
    let files = state.file_service.list_for_candidate(id).await?;

    Ok(Json(CandidateDetailResponse {
        candidate,
        technologies,
        files,
    }))
}

pub async fn list_candidates(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let candidates = state.candidate_service.list_candidates().await?;
    Ok(Json(serde_json::json!({ "candidates": candidates })))
}

pub async fn get_candidate_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    if state.candidate_service.get_candidate(id).await?.is_none() {
        return Err(Error::NotFound(format!("Candidate {} not found", id)));
    }
    let history = state.audit_service.history(id).await?;
    Ok(Json(serde_json::json!({ "history": history })))
}
