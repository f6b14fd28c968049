use crate::error::Result;
use crate::models::candidate_log::CandidateLog;
use crate::utils::request_meta::RequestMeta;
use sqlx::{PgPool, Postgres, Transaction};

/// Append-only writer for candidate_logs. Entries are never updated or
/// deleted; reads are exposed through the candidate history endpoint.
#[derive(Clone)]
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Standalone audit write, used for file actions that happen outside a
    /// candidate mutation.
    pub async fn log(
        &self,
        candidate_id: Option<i64>,
        action: &str,
        details: &str,
        meta: &RequestMeta,
        performed_by: &str,
    ) -> Result<CandidateLog> {
        let row = sqlx::query_as::<_, CandidateLog>(
            r#"
            INSERT INTO candidate_logs (candidate_id, action, details, ip_address, user_agent, performed_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, candidate_id, action, details, ip_address, user_agent, performed_by, created_at
            "#,
        )
        .bind(candidate_id)
        .bind(action)
        .bind(details)
        .bind(&meta.client_ip)
        .bind(&meta.user_agent)
        .bind(performed_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Same write on an open transaction, so the audit row commits or rolls
    /// back together with the mutation it describes.
    pub async fn log_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        candidate_id: Option<i64>,
        action: &str,
        details: &str,
        meta: &RequestMeta,
        performed_by: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO candidate_logs (candidate_id, action, details, ip_address, user_agent, performed_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(candidate_id)
        .bind(action)
        .bind(details)
        .bind(&meta.client_ip)
        .bind(&meta.user_agent)
        .bind(performed_by)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn history(&self, candidate_id: i64) -> Result<Vec<CandidateLog>> {
        let rows = sqlx::query_as::<_, CandidateLog>(
            r#"
            SELECT id, candidate_id, action, details, ip_address, user_agent, performed_by, created_at
            FROM candidate_logs
            WHERE candidate_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
