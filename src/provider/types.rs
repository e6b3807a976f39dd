//! Request and response values of the identity provider API
//!
//! These mirror the provider's operations without tying callers to the SDK.

use crate::attributes::UserAttribute;
use crate::error::ResponseError;
use std::collections::BTreeMap;

/// Challenge name signalling that the user must set a new password
pub const NEW_PASSWORD_REQUIRED: &str = "NEW_PASSWORD_REQUIRED";

/// How the provider delivers the temporary password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMedium {
    Email,
}

/// Authentication flows understood by `InitiateAuth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    UserPasswordAuth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCreateUserRequest {
    pub user_pool_id: String,
    pub username: String,
    pub desired_delivery_mediums: Vec<DeliveryMedium>,
    pub user_attributes: Vec<UserAttribute>,
    pub temporary_password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminCreateUserResponse {
    pub user: Option<UserRecord>,
}

/// User record echoed back by `AdminCreateUser`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub username: Option<String>,
    pub user_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDeleteUserRequest {
    pub user_pool_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateAuthRequest {
    pub client_id: String,
    pub auth_flow: AuthFlow,
    pub auth_parameters: BTreeMap<String, String>,
}

impl InitiateAuthRequest {
    /// Username/password authentication request
    pub fn user_password(client_id: &str, username: &str, password: &str) -> Self {
        let mut auth_parameters = BTreeMap::new();
        auth_parameters.insert("USERNAME".to_string(), username.to_string());
        auth_parameters.insert("PASSWORD".to_string(), password.to_string());

        InitiateAuthRequest {
            client_id: client_id.to_string(),
            auth_flow: AuthFlow::UserPasswordAuth,
            auth_parameters,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitiateAuthResponse {
    pub challenge_name: Option<String>,
    pub session: Option<String>,
    pub authentication_result: Option<AuthenticationResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
}

/// Outcome of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    /// Identity token issued by the provider
    Token(String),
    /// The user must set a new password before logging in
    PasswordChangeRequired,
}

impl InitiateAuthResponse {
    /// Interpret the response.
    ///
    /// A `NEW_PASSWORD_REQUIRED` challenge short-circuits before the token
    /// field is looked at.
    pub fn into_auth_result(self) -> Result<AuthResult, ResponseError> {
        match self.challenge_name.as_deref() {
            Some(NEW_PASSWORD_REQUIRED) => return Ok(AuthResult::PasswordChangeRequired),
            Some(other) => return Err(ResponseError::UnsupportedChallenge(other.to_string())),
            None => {}
        }

        self.authentication_result
            .and_then(|result| result.id_token)
            .map(AuthResult::Token)
            .ok_or(ResponseError::MissingField("AuthenticationResult.IdToken"))
    }
}
