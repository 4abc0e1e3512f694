//! Common test utilities for declquery
//!
//! Fixture generators for C# sources, on-disk corpora and assertions shared
//! by the integration and end-to-end tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
