//! Textcraft Server Library
//!
//! Text transformation proxy: accepts text plus a mode (summarize, rewrite,
//! correct, expand, paraphrase), forwards it to a hosted text-generation
//! provider and normalizes the reply into a uniform JSON envelope.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AppSettings;
pub use error::AppError;
pub use models::Mode;
pub use services::text_router::TextRouter;
