pub mod audit_service;
pub mod candidate_service;
pub mod file_service;
