pub mod request_meta;
pub mod text;
