//! User attribute schema
//!
//! The attribute schema names the user attributes written when a user is
//! created. Quota attributes mirror the `--num-dapps` value unless an
//! explicit limit is given.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Payment provider recorded for users created by this tool
pub const PAYMENT_PROVIDER: &str = "ADMIN";

/// Payment status recorded for users created by this tool
pub const PAYMENT_STATUS: &str = "ACTIVE";

const EMAIL_ATTR: &str = "email";
const EMAIL_VERIFIED_ATTR: &str = "email_verified";

/// Attribute names written by `create`.
///
/// Any attribute other than `num_dapps` can be set to `null` in the settings
/// file to leave it out of the request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeSchema {
    pub num_dapps: String,
    pub standard_limit: Option<String>,
    pub professional_limit: Option<String>,
    pub enterprise_limit: Option<String>,
    pub payment_provider: Option<String>,
    pub payment_status: Option<String>,
    /// Emit `email` and `email_verified` derived from the username
    pub email: bool,
}

impl Default for AttributeSchema {
    fn default() -> Self {
        AttributeSchema {
            num_dapps: "custom:num_dapps".to_string(),
            standard_limit: Some("custom:standard_limit".to_string()),
            professional_limit: Some("custom:professional_limit".to_string()),
            enterprise_limit: Some("custom:enterprise_limit".to_string()),
            payment_provider: Some("custom:payment_provider".to_string()),
            payment_status: Some("custom:payment_status".to_string()),
            email: true,
        }
    }
}

/// Quota values supplied on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotaInput {
    pub num_dapps: u32,
    pub standard_limit: Option<u32>,
    pub professional_limit: Option<u32>,
    pub enterprise_limit: Option<u32>,
}

impl QuotaInput {
    /// Quota input with every limit mirrored from `num_dapps`
    pub fn new(num_dapps: u32) -> Self {
        QuotaInput {
            num_dapps,
            ..Default::default()
        }
    }
}

/// A single user attribute as sent to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        UserAttribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl AttributeSchema {
    /// Check that every override on the command line has an attribute to land in
    pub fn check_overrides(&self, quota: &QuotaInput) -> ConfigResult<()> {
        let pairs = [
            ("standard-limit", quota.standard_limit, &self.standard_limit),
            ("professional-limit", quota.professional_limit, &self.professional_limit),
            ("enterprise-limit", quota.enterprise_limit, &self.enterprise_limit),
        ];

        for (option, value, attr) in pairs {
            if value.is_some() && attr.is_none() {
                return Err(ConfigError::UnmappedOverride {
                    option: option.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Build the attribute set for a new user
    pub fn build(&self, username: &str, quota: &QuotaInput) -> ConfigResult<Vec<UserAttribute>> {
        self.check_overrides(quota)?;

        let num_dapps = quota.num_dapps.to_string();
        let limit = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_else(|| num_dapps.clone());

        let mut attrs = vec![UserAttribute::new(&self.num_dapps, num_dapps.clone())];

        if let Some(name) = &self.standard_limit {
            attrs.push(UserAttribute::new(name, limit(quota.standard_limit)));
        }
        if let Some(name) = &self.professional_limit {
            attrs.push(UserAttribute::new(name, limit(quota.professional_limit)));
        }
        if let Some(name) = &self.enterprise_limit {
            attrs.push(UserAttribute::new(name, limit(quota.enterprise_limit)));
        }
        if let Some(name) = &self.payment_provider {
            attrs.push(UserAttribute::new(name, PAYMENT_PROVIDER));
        }
        if let Some(name) = &self.payment_status {
            attrs.push(UserAttribute::new(name, PAYMENT_STATUS));
        }
        if self.email {
            attrs.push(UserAttribute::new(EMAIL_ATTR, username));
            attrs.push(UserAttribute::new(EMAIL_VERIFIED_ATTR, "true"));
        }

        Ok(attrs)
    }

    /// Reject blank attribute names
    pub fn validate(&self) -> ConfigResult<()> {
        let names = [
            Some(&self.num_dapps),
            self.standard_limit.as_ref(),
            self.professional_limit.as_ref(),
            self.enterprise_limit.as_ref(),
            self.payment_provider.as_ref(),
            self.payment_status.as_ref(),
        ];

        if names.into_iter().flatten().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "attribute names must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
