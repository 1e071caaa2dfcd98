//! Shared utilities, configuration, and error handling for CodeCamp
//!
//! This crate provides common functionality used across the CodeCamp application:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Validated JSON extraction
//! - Password hashing

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use crypto::{hash_secret, hash_secret_with_iterations, verify_secret_hash};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
