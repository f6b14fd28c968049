pub mod candidate;
pub mod candidate_file;
pub mod candidate_log;
