//! Shared module - Common types and utilities
//!
//! Types shared across all features. No tree-sitter or filesystem dependencies.

pub mod models;

pub use models::*;
