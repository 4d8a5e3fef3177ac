//! Biblio - Book Catalog Management Server
//!
//! A Rust REST API server for managing a small book catalog: authors and
//! the books they wrote, with pagination, filtering, soft deletion and a
//! uniform JSON response envelope.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
