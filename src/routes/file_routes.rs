use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use tokio::fs;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::candidate_log::actions;
use crate::utils::request_meta::RequestMeta;
use crate::AppState;

async fn save_resume_file(filename: &str, data: &bytes::Bytes) -> Result<(String, String)> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    if ext != "pdf" {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed, only PDF resumes are accepted",
            ext
        )));
    }
    if !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }

    let upload_dir = get_config().uploads_dir.clone();
    fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    let blob_name = format!("{}.pdf", uuid::Uuid::new_v4());
    let file_path = format!("{}/{}", upload_dir, blob_name);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!("Failed to write resume file: {}", e);
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    let url = format!("/uploads/{}", blob_name);
    Ok((blob_name, url))
}

/// Multipart upload of a resume PDF. The file may arrive before the
/// candidate exists; `candidate_id` is optional and can be linked later.
pub async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut candidate_id: Option<i64> = None;
    let mut original_name = None;
    let mut data: Option<bytes::Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "candidate_id" => {
                let raw = field.text().await.unwrap_or_default();
                if let Ok(id) = raw.parse::<i64>() {
                    candidate_id = Some(id);
                }
            }
            "file" => {
                original_name = Some(field.file_name().unwrap_or("resume.pdf").to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read resume bytes: {}", e);
                    Error::BadRequest("Failed to read file upload".into())
                })?;
                if !bytes.is_empty() {
                    data = Some(bytes);
                }
            }
            _ => {}
        }
    }

    let original_name =
        original_name.ok_or_else(|| Error::BadRequest("A resume file is required".into()))?;
    let data = data.ok_or_else(|| Error::BadRequest("A resume file is required".into()))?;

    if let Some(id) = candidate_id {
        if state.candidate_service.get_candidate(id).await?.is_none() {
            return Err(Error::NotFound(format!("Candidate {} not found", id)));
        }
    }

    let (blob_name, blob_url) = save_resume_file(&original_name, &data).await?;

    let file = state
        .file_service
        .create_file(
            candidate_id,
            &blob_name,
            &original_name,
            &blob_name,
            &blob_url,
            data.len() as i64,
            "application/pdf",
        )
        .await?;

    let meta = RequestMeta::from_headers(&headers);
    state
        .audit_service
        .log(
            candidate_id,
            actions::PDF_UPLOADED,
            &format!("Uploaded resume '{}' ({} bytes)", original_name, data.len()),
            &meta,
            "candidate",
        )
        .await?;

    Ok((StatusCode::CREATED, Json(serde_json::to_value(file)?)))
}

pub async fn delete_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let file = state.file_service.soft_delete(id).await?;

    let meta = RequestMeta::from_headers(&headers);
    state
        .audit_service
        .log(
            file.candidate_id,
            actions::PDF_DELETED,
            &format!("Soft-deleted resume '{}'", file.original_name),
            &meta,
            "candidate",
        )
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true, "id": file.id })))
}

#[derive(Debug, Deserialize)]
pub struct LinkFileRequest {
    pub candidate_id: i64,
}

/// Associates an earlier upload with a now-registered candidate. The link
/// is best-effort: a failure is logged and reported, never escalated into
/// a registration failure.
pub async fn link_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<LinkFileRequest>,
) -> Result<Json<serde_json::Value>> {
    match state
        .file_service
        .link_to_candidate(id, payload.candidate_id)
        .await
    {
        Ok(file) => {
            let meta = RequestMeta::from_headers(&headers);
            state
                .audit_service
                .log(
                    Some(payload.candidate_id),
                    actions::PDF_LINKED,
                    &format!("Linked resume '{}' to candidate", file.original_name),
                    &meta,
                    "candidate",
                )
                .await?;
            Ok(Json(serde_json::json!({ "linked": true, "id": file.id })))
        }
        Err(e) => {
            tracing::warn!(file_id = id, candidate_id = payload.candidate_id, error = %e,
                "failed to link resume to candidate");
            Ok(Json(serde_json::json!({ "linked": false, "id": id })))
        }
    }
}
