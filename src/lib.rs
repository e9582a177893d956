//! techNotes - Employee notes management API
//!
//! A small record-management backend exposing users and notes over HTTP,
//! built on Axum and SeaORM with a clean-architecture layout.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases, business logic and integrity guards
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Note, Password, User};
pub use errors::{AppError, AppResult};
