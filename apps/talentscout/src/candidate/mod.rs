pub mod anonymizer;
pub mod models;
