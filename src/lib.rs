pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    audit_service::AuditService, candidate_service::CandidateService, file_service::FileService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub candidate_service: CandidateService,
    pub audit_service: AuditService,
    pub file_service: FileService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let candidate_service = CandidateService::new(pool.clone());
        let audit_service = AuditService::new(pool.clone());
        let file_service = FileService::new(pool.clone());

        Self {
            pool,
            candidate_service,
            audit_service,
            file_service,
        }
    }
}
