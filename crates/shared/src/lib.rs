//! Shared types, errors, and configuration for Balanza.
//!
//! This crate provides common types used across all other crates:
//! - Currency catalog with the fixed set of report currencies
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ReportingConfig};
pub use error::{AppError, AppResult};
