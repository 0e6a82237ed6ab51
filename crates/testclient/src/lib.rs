//! `remotion-testclient` library crate.
//!
//! Holds the demo flow so it can be driven by integration tests. The
//! binary entrypoint lives in `main.rs`.

pub mod demo;
pub mod settings;
