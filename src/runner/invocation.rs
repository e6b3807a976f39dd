//! Command invocations
//!
//! An invocation is built once from the command line and consumed by
//! exactly one operation.

use crate::attributes::QuotaInput;

/// A fully resolved user management command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Create {
        username: String,
        user_pool_id: String,
        quota: QuotaInput,
        temp_password: Option<String>,
    },
    Delete {
        username: String,
        user_pool_id: String,
    },
    Login {
        username: String,
        client_id: String,
        password: String,
    },
}

impl Invocation {
    /// User the command acts on
    pub fn username(&self) -> &str {
        match self {
            Invocation::Create { username, .. }
            | Invocation::Delete { username, .. }
            | Invocation::Login { username, .. } => username,
        }
    }

    /// User pool the command targets, for commands that name one
    pub fn user_pool_id(&self) -> Option<&str> {
        match self {
            Invocation::Create { user_pool_id, .. } | Invocation::Delete { user_pool_id, .. } => {
                Some(user_pool_id)
            }
            Invocation::Login { .. } => None,
        }
    }
}
