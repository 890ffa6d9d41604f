//! Energy usage upload API.
//!
//! Library surface for the `upload-api` binary; exposed so integration
//! tests can exercise the router directly.

pub mod config;
pub mod server;
pub mod state;
