use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub areas: Option<String>,
    pub technologies_raw: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechnologyTag {
    pub id: i64,
    pub candidate_id: i64,
    pub technology_name: String,
    pub created_at: Option<DateTime<Utc>>,
}
