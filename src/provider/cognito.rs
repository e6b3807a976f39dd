//! Cognito user pool client
//!
//! Wraps the AWS SDK client and drives it on a single-threaded runtime.
//! Credentials and region come from the standard AWS sources: environment
//! variables, the shared `~/.aws` files and the active profile.
//! Administrative operations need credentials; `InitiateAuth` does not.

use crate::config::{resolve_region, Settings};
use crate::error::{CogError, ConfigError, ProviderError, ResponseError, Result};
use crate::provider::types::*;
use crate::provider::IdentityProvider;
use aws_config::meta::region::ProvideRegion;
use aws_config::profile::ProfileFileRegionProvider;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_cognitoidentityprovider::config::http::HttpResponse;
use aws_sdk_cognitoidentityprovider::config::Region;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentityprovider::operation::admin_create_user::AdminCreateUserOutput;
use aws_sdk_cognitoidentityprovider::operation::initiate_auth::InitiateAuthOutput;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType, DeliveryMediumType};
use aws_sdk_cognitoidentityprovider::Client;
use std::error::Error as StdError;
use tokio::runtime::{Builder, Runtime};

/// Blocking client for a Cognito user pool
pub struct CognitoClient {
    runtime: Runtime,
    client: Client,
    config: SdkConfig,
    region: Option<String>,
    endpoint_url: Option<String>,
}

fn new_runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

impl CognitoClient {
    /// Create a client for an explicit region and optional endpoint override
    pub fn new(region: Option<String>, endpoint_url: Option<String>) -> Result<Self> {
        Self::with_runtime(new_runtime()?, region, endpoint_url)
    }

    /// Create a client from resolved settings.
    ///
    /// The pool id, when known, supplies the region as a last resort.
    pub fn from_settings(settings: &Settings, pool_id: Option<&str>) -> Result<Self> {
        let runtime = new_runtime()?;
        let profile_region = runtime
            .block_on(ProfileFileRegionProvider::new().region())
            .map(|region| region.to_string());

        let region = resolve_region(settings, pool_id, profile_region.as_deref());
        if region.is_none() && settings.endpoint_url.is_none() {
            return Err(ConfigError::MissingRegion.into());
        }

        Self::with_runtime(runtime, region, settings.endpoint_url.clone())
    }

    fn with_runtime(
        runtime: Runtime,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = &endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ProviderError::InvalidEndpoint(url.clone()).into());
            }
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(region.clone().map(Region::new))
            .retry_config(RetryConfig::disabled());
        if let Some(url) = &endpoint_url {
            loader = loader.endpoint_url(url.as_str());
        }

        let config = runtime.block_on(loader.load());
        let client = Client::new(&config);

        Ok(CognitoClient {
            runtime,
            client,
            config,
            region,
            endpoint_url,
        })
    }

    /// Region requests are sent to and signed for
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Endpoint override, when not using the regional endpoint
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    /// Administrative calls are signed, so they need a region and credentials
    fn require_signing(&self) -> Result<()> {
        if self.region.is_none() {
            return Err(ConfigError::MissingRegion.into());
        }

        let provider = self
            .config
            .credentials_provider()
            .ok_or(ConfigError::MissingCredentials)?;
        self.runtime
            .block_on(provider.provide_credentials())
            .map_err(|_| ConfigError::MissingCredentials)?;

        Ok(())
    }
}

impl IdentityProvider for CognitoClient {
    fn admin_create_user(&self, request: &AdminCreateUserRequest) -> Result<AdminCreateUserResponse> {
        self.require_signing()?;

        let attributes = request
            .user_attributes
            .iter()
            .map(|attr| {
                AttributeType::builder()
                    .name(&attr.name)
                    .value(&attr.value)
                    .build()
                    .map_err(|e| ProviderError::Transport(e.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mediums = request
            .desired_delivery_mediums
            .iter()
            .map(|medium| match medium {
                DeliveryMedium::Email => DeliveryMediumType::Email,
            })
            .collect();

        let output = self
            .runtime
            .block_on(
                self.client
                    .admin_create_user()
                    .user_pool_id(&request.user_pool_id)
                    .username(&request.username)
                    .set_user_attributes(Some(attributes))
                    .set_desired_delivery_mediums(Some(mediums))
                    .set_temporary_password(request.temporary_password.clone())
                    .send(),
            )
            .map_err(sdk_error)?;

        Ok(create_response(&output))
    }

    fn admin_delete_user(&self, request: &AdminDeleteUserRequest) -> Result<()> {
        self.require_signing()?;

        self.runtime
            .block_on(
                self.client
                    .admin_delete_user()
                    .user_pool_id(&request.user_pool_id)
                    .username(&request.username)
                    .send(),
            )
            .map_err(sdk_error)?;

        Ok(())
    }

    fn initiate_auth(&self, request: &InitiateAuthRequest) -> Result<InitiateAuthResponse> {
        let flow = match request.auth_flow {
            AuthFlow::UserPasswordAuth => AuthFlowType::UserPasswordAuth,
        };

        let output = self
            .runtime
            .block_on(
                self.client
                    .initiate_auth()
                    .client_id(&request.client_id)
                    .auth_flow(flow)
                    .set_auth_parameters(Some(request.auth_parameters.clone().into_iter().collect()))
                    .send(),
            )
            .map_err(sdk_error)?;

        Ok(auth_response(&output))
    }
}

fn create_response(output: &AdminCreateUserOutput) -> AdminCreateUserResponse {
    AdminCreateUserResponse {
        user: output.user().map(|user| UserRecord {
            username: user.username().map(str::to_string),
            user_status: user.user_status().map(|status| status.as_str().to_string()),
        }),
    }
}

fn auth_response(output: &InitiateAuthOutput) -> InitiateAuthResponse {
    InitiateAuthResponse {
        challenge_name: output.challenge_name().map(|name| name.as_str().to_string()),
        session: output.session().map(str::to_string),
        authentication_result: output.authentication_result().map(|result| {
            AuthenticationResult {
                id_token: result.id_token().map(str::to_string),
                access_token: result.access_token().map(str::to_string),
                refresh_token: result.refresh_token().map(str::to_string),
                token_type: result.token_type().map(str::to_string),
            }
        }),
    }
}

/// Map an SDK failure onto the error taxonomy.
///
/// Service errors keep the HTTP status, exception name and message.
fn sdk_error<E>(err: SdkError<E, HttpResponse>) -> CogError
where
    E: ProvideErrorMetadata + StdError + 'static,
{
    match &err {
        SdkError::ServiceError(context) => {
            let service = context.err();
            ProviderError::Service {
                status: context.raw().status().as_u16(),
                code: service.code().unwrap_or("UnknownError").to_string(),
                message: service.message().unwrap_or_default().to_string(),
            }
            .into()
        }
        SdkError::ResponseError(_) => {
            ResponseError::Decode(DisplayErrorContext(&err).to_string()).into()
        }
        _ => ProviderError::Transport(DisplayErrorContext(&err).to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint() {
        let result = CognitoClient::new(Some("us-east-1".to_string()), Some("not a url".to_string()));
        assert!(matches!(
            result,
            Err(CogError::Provider(ProviderError::InvalidEndpoint(_)))
        ));
    }

    #[test]
    fn test_client_keeps_region_and_endpoint() {
        let client = CognitoClient::new(
            Some("eu-west-1".to_string()),
            Some("http://127.0.0.1:9229".to_string()),
        )
        .unwrap();
        assert_eq!(client.region(), Some("eu-west-1"));
        assert_eq!(client.endpoint_url(), Some("http://127.0.0.1:9229"));
    }

    #[test]
    fn test_admin_call_without_region() {
        let client = CognitoClient::new(None, Some("http://127.0.0.1:9".to_string())).unwrap();
        let request = AdminDeleteUserRequest {
            user_pool_id: "P1".to_string(),
            username: "a@b.com".to_string(),
        };
        assert!(matches!(
            client.admin_delete_user(&request),
            Err(CogError::Config(ConfigError::MissingRegion))
        ));
    }

    #[test]
    fn test_from_settings_region_and_endpoint() {
        let settings = Settings {
            region: Some("sa-east-1".to_string()),
            endpoint_url: Some("http://127.0.0.1:9229".to_string()),
            ..Default::default()
        };
        let client = CognitoClient::from_settings(&settings, None).unwrap();
        assert_eq!(client.region(), Some("sa-east-1"));
        assert_eq!(client.endpoint_url(), Some("http://127.0.0.1:9229"));
    }
}
