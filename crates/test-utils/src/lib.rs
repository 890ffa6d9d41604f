//! Shared test utilities for the energy-usage-upload workspace.
//!
//! Provides CSV byte builders and storage fakes used by the ingestion
//! and service tests.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;

pub use fixtures::*;
