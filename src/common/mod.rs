//! Shared infrastructure: the crate error type and runtime configuration.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
