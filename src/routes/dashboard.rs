use axum::{extract::State, Json};

use crate::dto::dashboard_dto::DashboardStats;
use crate::error::Result;
use crate::AppState;

pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let total_candidates = state.candidate_service.count_candidates().await?;
    let total_files = state.file_service.count_active().await?;
    let registrations_last_7_days = state.candidate_service.registration_history().await?;

    Ok(Json(DashboardStats {
        total_candidates,
        total_files,
        registrations_last_7_days,
    }))
}
