//! Shared configuration and error types for the Remotion Lambda client.

pub mod config;
pub mod error;
pub mod regions;
