pub mod analysis;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod pdf;
pub mod report;
pub mod routes;
pub mod state;
