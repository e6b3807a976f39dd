//! Identity provider access
//!
//! The `IdentityProvider` trait describes the three remote operations the
//! tool issues. `CognitoClient` implements them with the AWS SDK; tests
//! substitute their own implementation.

pub mod cognito;
pub mod types;

pub use cognito::*;
pub use types::*;

use crate::error::Result;

/// Remote user management operations
pub trait IdentityProvider {
    /// Create a user in a pool
    fn admin_create_user(&self, request: &AdminCreateUserRequest) -> Result<AdminCreateUserResponse>;

    /// Delete a user from a pool
    fn admin_delete_user(&self, request: &AdminDeleteUserRequest) -> Result<()>;

    /// Start an authentication flow
    fn initiate_auth(&self, request: &InitiateAuthRequest) -> Result<InitiateAuthResponse>;
}
