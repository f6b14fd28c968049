use crate::dto::candidate_dto::{CandidateListItem, RegisterCandidatePayload, UpsertResult};
use crate::dto::dashboard_dto::DayCount;
use crate::error::{self, Error, Result};
use crate::models::candidate::{Candidate, TechnologyTag};
use crate::models::candidate_log::actions;
use crate::services::audit_service::AuditService;
use crate::utils::request_meta::RequestMeta;
use crate::utils::text::{clean_optional, normalize_email, parse_technologies};
use sqlx::PgPool;
use std::collections::HashMap;

const CANDIDATE_COLUMNS: &str = "id, name, email, phone, role, experience, location, areas, \
     technologies_raw, status, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Case-insensitive, trimmed point lookup. Used by the registration
    /// orchestration to offer the two-step update confirmation; the insert
    /// itself still relies on the UNIQUE(email) constraint, since a
    /// concurrent submission can slip in between this check and the write.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE LOWER(email) = $1 AND status = 'active'"
        ))
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    /// Atomically persists the candidate, replaces its technology tag set
    /// and appends one audit entry. Nothing survives a failure part-way:
    /// dropping the transaction on any error path rolls everything back.
    pub async fn upsert_candidate(
        &self,
        payload: &RegisterCandidatePayload,
        meta: &RequestMeta,
        performed_by: &str,
    ) -> Result<UpsertResult> {
        let email = normalize_email(&payload.email);
        let name = payload.name.trim().to_string();
        let phone = clean_optional(payload.phone.as_deref());
        let role = clean_optional(payload.role.as_deref());
        let experience = clean_optional(payload.experience.as_deref());
        let location = clean_optional(payload.location.as_deref());
        let areas = clean_optional(payload.areas.as_deref());
        let technologies_raw = payload
            .technologies
            .as_ref()
            .map(|t| t.as_raw_text())
            .and_then(|t| clean_optional(Some(&t)));
        let tokens = technologies_raw
            .as_deref()
            .map(parse_technologies)
            .unwrap_or_default();

        let mut tx = self.pool.begin().await?;

        let (candidate_id, candidate_name, candidate_email) = match payload.candidate_id {
            // Update path: email is the natural key and is never rewritten.
            Some(id) => sqlx::query_as::<_, (i64, String, String)>(
                r#"
                UPDATE candidates
                SET name = $1, phone = $2, role = $3, experience = $4,
                    location = $5, areas = $6, technologies_raw = $7, updated_at = NOW()
                WHERE id = $8
                RETURNING id, name, email
                "#,
            )
            .bind(&name)
            .bind(&phone)
            .bind(&role)
            .bind(&experience)
            .bind(&location)
            .bind(&areas)
            .bind(&technologies_raw)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?,
            None => {
                let inserted = sqlx::query_as::<_, (i64, String, String)>(
                    r#"
                    INSERT INTO candidates (name, email, phone, role, experience, location, areas, technologies_raw)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    RETURNING id, name, email
                    "#,
                )
                .bind(&name)
                .bind(&email)
                .bind(&phone)
                .bind(&role)
                .bind(&experience)
                .bind(&location)
                .bind(&areas)
                .bind(&technologies_raw)
                .fetch_one(&mut *tx)
                .await;
                match inserted {
                    Ok(row) => row,
                    // Lost the race between the pre-check and this insert:
                    // report a conflict, not a generic failure.
                    Err(e) if error::is_unique_violation(&e) => {
                        return Err(Error::DuplicateEmail { existing: None });
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        // Full replace of the tag set, not a diff.
        if payload.candidate_id.is_some() {
            sqlx::query("DELETE FROM candidate_technologies WHERE candidate_id = $1")
                .bind(candidate_id)
                .execute(&mut *tx)
                .await?;
        }

        let mut technologies = Vec::with_capacity(tokens.len());
        for token in &tokens {
            // A duplicate (candidate, name) pair is benign and skipped;
            // any other insert failure aborts the whole transaction.
            let result = sqlx::query(
                r#"
                INSERT INTO candidate_technologies (candidate_id, technology_name)
                VALUES ($1, $2)
                ON CONFLICT (candidate_id, technology_name) DO NOTHING
                "#,
            )
            .bind(candidate_id)
            .bind(token)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() > 0 {
                technologies.push(token.clone());
            }
        }

        let (action, verb) = if payload.candidate_id.is_some() {
            (actions::UPDATE, "Updated")
        } else {
            (actions::CREATE, "Registered")
        };
        let details = format!(
            "{} candidate '{}' <{}> with {} technologies",
            verb,
            candidate_name,
            candidate_email,
            technologies.len()
        );
        AuditService::log_in_tx(&mut tx, Some(candidate_id), action, &details, meta, performed_by)
            .await?;

        tx.commit().await?;

        Ok(UpsertResult {
            candidate_id,
            candidate_name,
            candidate_email,
            technologies_count: technologies.len(),
            technologies,
        })
    }

    pub async fn technologies_for(&self, candidate_id: i64) -> Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT technology_name FROM candidate_technologies WHERE candidate_id = $1 ORDER BY id",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_candidates(&self) -> Result<Vec<CandidateListItem>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE status = 'active' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let tags = sqlx::query_as::<_, TechnologyTag>(
            "SELECT id, candidate_id, technology_name, created_at FROM candidate_technologies ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_candidate: HashMap<i64, Vec<String>> = HashMap::new();
        for tag in tags {
            by_candidate
                .entry(tag.candidate_id)
                .or_default()
                .push(tag.technology_name);
        }

        Ok(candidates
            .into_iter()
            .map(|candidate| {
                let technologies = by_candidate.remove(&candidate.id).unwrap_or_default();
                CandidateListItem {
                    candidate,
                    technologies,
                }
            })
            .collect())
    }

    pub async fn count_candidates(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM candidates WHERE status = 'active'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn registration_history(&self) -> Result<Vec<DayCount>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS date, COUNT(*) AS count
            FROM candidates
            WHERE created_at > NOW() - INTERVAL '7 days'
            GROUP BY TO_CHAR(created_at, 'YYYY-MM-DD')
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, count)| DayCount { date, count })
            .collect())
    }
}
