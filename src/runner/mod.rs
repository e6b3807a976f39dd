//! Command execution
//!
//! This module holds the invocation value, the execution context and the
//! three user management operations.

pub mod context;
pub mod invocation;
pub mod operation;

// Re-export main types
pub use context::*;
pub use invocation::*;
pub use operation::*;
