//! User management operations
//!
//! Each operation issues exactly one remote call and reports the result as
//! an `Outcome`. Provider errors propagate unchanged.

use crate::attributes::{AttributeSchema, QuotaInput};
use crate::error::Result;
use crate::provider::{
    AdminCreateUserRequest, AdminDeleteUserRequest, AuthResult, DeliveryMedium,
    IdentityProvider, InitiateAuthRequest,
};
use crate::runner::{Context, Invocation};
use std::fmt;

/// Result of a completed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created {
        username: String,
        user_pool_id: String,
    },
    Deleted {
        username: String,
        user_pool_id: String,
    },
    Authenticated {
        id_token: String,
    },
    PasswordChangeRequired,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created {
                username,
                user_pool_id,
            } => write!(
                f,
                "Created user {} for user pool {}. Check email for a temporary password.",
                username, user_pool_id
            ),
            Outcome::Deleted {
                username,
                user_pool_id,
            } => write!(f, "Deleted user {} for user pool {}.", username, user_pool_id),
            Outcome::Authenticated { id_token } => write!(f, "AUTH_TOKEN={}", id_token),
            Outcome::PasswordChangeRequired => write!(
                f,
                "Password change required, use the Web UI to set your password."
            ),
        }
    }
}

/// Create a user with the schema's attribute set
pub fn create_user(
    provider: &dyn IdentityProvider,
    schema: &AttributeSchema,
    username: &str,
    user_pool_id: &str,
    quota: &QuotaInput,
    temp_password: Option<&str>,
    ctx: &Context,
) -> Result<Outcome> {
    let attributes = schema.build(username, quota)?;
    for attr in &attributes {
        ctx.print_debug(&format!("Attribute {} = {}", attr.name, attr.value));
    }

    let request = AdminCreateUserRequest {
        user_pool_id: user_pool_id.to_string(),
        username: username.to_string(),
        desired_delivery_mediums: vec![DeliveryMedium::Email],
        user_attributes: attributes,
        temporary_password: temp_password.map(str::to_string),
    };

    ctx.print_call("AdminCreateUser", user_pool_id);
    let response = provider.admin_create_user(&request)?;

    if let Some(status) = response.user.and_then(|user| user.user_status) {
        ctx.print_debug(&format!("User status: {}", status));
    }

    Ok(Outcome::Created {
        username: username.to_string(),
        user_pool_id: user_pool_id.to_string(),
    })
}

/// Delete a user from a pool
pub fn delete_user(
    provider: &dyn IdentityProvider,
    username: &str,
    user_pool_id: &str,
    ctx: &Context,
) -> Result<Outcome> {
    let request = AdminDeleteUserRequest {
        user_pool_id: user_pool_id.to_string(),
        username: username.to_string(),
    };

    ctx.print_call("AdminDeleteUser", user_pool_id);
    provider.admin_delete_user(&request)?;

    Ok(Outcome::Deleted {
        username: username.to_string(),
        user_pool_id: user_pool_id.to_string(),
    })
}

/// Log in with username and password
pub fn login(
    provider: &dyn IdentityProvider,
    username: &str,
    password: &str,
    client_id: &str,
    ctx: &Context,
) -> Result<Outcome> {
    let request = InitiateAuthRequest::user_password(client_id, username, password);

    ctx.print_call("InitiateAuth", client_id);
    let response = provider.initiate_auth(&request)?;

    match response.into_auth_result()? {
        AuthResult::PasswordChangeRequired => Ok(Outcome::PasswordChangeRequired),
        AuthResult::Token(id_token) => Ok(Outcome::Authenticated { id_token }),
    }
}

/// Run one invocation against a provider
pub fn execute(
    invocation: &Invocation,
    provider: &dyn IdentityProvider,
    ctx: &Context,
) -> Result<Outcome> {
    match invocation {
        Invocation::Create {
            username,
            user_pool_id,
            quota,
            temp_password,
        } => create_user(
            provider,
            ctx.schema(),
            username,
            user_pool_id,
            quota,
            temp_password.as_deref(),
            ctx,
        ),
        Invocation::Delete {
            username,
            user_pool_id,
        } => delete_user(provider, username, user_pool_id, ctx),
        Invocation::Login {
            username,
            client_id,
            password,
        } => login(provider, username, password, client_id, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_lines() {
        let created = Outcome::Created {
            username: "a@b.com".to_string(),
            user_pool_id: "P1".to_string(),
        };
        assert_eq!(
            created.to_string(),
            "Created user a@b.com for user pool P1. Check email for a temporary password."
        );

        let deleted = Outcome::Deleted {
            username: "a@b.com".to_string(),
            user_pool_id: "P1".to_string(),
        };
        assert_eq!(deleted.to_string(), "Deleted user a@b.com for user pool P1.");

        let token = Outcome::Authenticated {
            id_token: "tok123".to_string(),
        };
        assert_eq!(token.to_string(), "AUTH_TOKEN=tok123");
    }
}
