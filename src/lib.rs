pub mod common;
pub mod config;
pub mod observability;
pub mod pipeline;

// Application layer and its adapters
pub mod app;
pub mod infra;
