use crate::error::{Error, Result};
use crate::models::candidate_file::CandidateFile;
use sqlx::PgPool;

const FILE_COLUMNS: &str = "id, candidate_id, file_name, original_name, blob_name, blob_url, \
     file_size, content_type, status, uploaded_at, updated_at";

/// Metadata rows for uploaded resumes. Deletion is a status flip; the blob
/// stays on disk until physically purged so the audit trail keeps pointing
/// at something real.
#[derive(Clone)]
pub struct FileService {
    pool: PgPool,
}

impl FileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_file(
        &self,
        candidate_id: Option<i64>,
        file_name: &str,
        original_name: &str,
        blob_name: &str,
        blob_url: &str,
        file_size: i64,
        content_type: &str,
    ) -> Result<CandidateFile> {
        let row = sqlx::query_as::<_, CandidateFile>(&format!(
            r#"
            INSERT INTO candidate_files (candidate_id, file_name, original_name, blob_name, blob_url, file_size, content_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FILE_COLUMNS}
            "#
        ))
        .bind(candidate_id)
        .bind(file_name)
        .bind(original_name)
        .bind(blob_name)
        .bind(blob_url)
        .bind(file_size)
        .bind(content_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Soft-deleted files never show up here; they remain in the table for
    /// audit purposes only.
    pub async fn list_for_candidate(&self, candidate_id: i64) -> Result<Vec<CandidateFile>> {
        let rows = sqlx::query_as::<_, CandidateFile>(&format!(
            r#"
            SELECT {FILE_COLUMNS}
            FROM candidate_files
            WHERE candidate_id = $1 AND status = 'active'
            ORDER BY uploaded_at DESC
            "#
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<CandidateFile> {
        let row = sqlx::query_as::<_, CandidateFile>(&format!(
            r#"
            UPDATE candidate_files
            SET status = 'deleted', updated_at = NOW()
            WHERE id = $1 AND status = 'active'
            RETURNING {FILE_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("File {} not found", id)))?;
        Ok(row)
    }

    /// Associates an upload that arrived before its candidate existed.
    pub async fn link_to_candidate(&self, file_id: i64, candidate_id: i64) -> Result<CandidateFile> {
        let row = sqlx::query_as::<_, CandidateFile>(&format!(
            r#"
            UPDATE candidate_files
            SET candidate_id = $1, updated_at = NOW()
            WHERE id = $2 AND status = 'active'
            RETURNING {FILE_COLUMNS}
            "#
        ))
        .bind(candidate_id)
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("File {} not found", file_id)))?;
        Ok(row)
    }

    pub async fn count_active(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM candidate_files WHERE status = 'active'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
