use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateFile {
    pub id: i64,
    pub candidate_id: Option<i64>,
    pub file_name: String,
    pub original_name: String,
    pub blob_name: String,
    pub blob_url: String,
    pub file_size: i64,
    pub content_type: String,
    pub status: String,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
