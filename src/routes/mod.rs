pub mod candidate_routes;
pub mod dashboard;
pub mod file_routes;
pub mod health;
