//! Settings types
//!
//! This module defines the data structures that represent a cogctl.yml settings file.

use crate::attributes::AttributeSchema;
use serde::{Deserialize, Serialize};

/// Settings read from `cogctl.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Region of the user pool (e.g. "us-east-1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Endpoint override, for local emulators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Default user pool for `create` and `delete`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_pool_id: Option<String>,

    /// Default app client for `login`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Attribute names written by `create`
    #[serde(default)]
    pub attributes: AttributeSchema,
}

/// Values from the command line that take precedence over the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl Settings {
    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if overrides.region.is_some() {
            self.region = overrides.region;
        }
        if overrides.endpoint_url.is_some() {
            self.endpoint_url = overrides.endpoint_url;
        }
        self
    }
}
