use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only audit entry. Rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateLog {
    pub id: i64,
    pub candidate_id: Option<i64>,
    pub action: String,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub performed_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Audit action kinds written by the services.
pub mod actions {
    pub const CREATE: &str = "CREATE";
    pub const UPDATE: &str = "UPDATE";
    pub const PDF_UPLOADED: &str = "PDF_UPLOADED";
    pub const PDF_DELETED: &str = "PDF_DELETED";
    pub const PDF_LINKED: &str = "PDF_LINKED";
}
