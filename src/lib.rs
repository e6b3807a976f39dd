//! cogctl - test user management for Cognito user pools
//!
//! cogctl creates, deletes and logs in as users of a Cognito user pool, for
//! exercising services that verify Cognito identity tokens.

// Public modules
pub mod attributes;
pub mod cli;
pub mod config;
pub mod error;
pub mod provider;
pub mod runner;

// Re-export commonly used types
pub use error::{CogError, Result};

/// Current version of cogctl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
