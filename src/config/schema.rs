//! Settings validation
//!
//! This module provides validation of settings and identifiers, and region
//! resolution.

use crate::config::types::Settings;
use crate::error::{ConfigError, ConfigResult};
use regex::Regex;
use std::env;

/// Shape of a user pool id, e.g. `us-east-1_AbC123`
const POOL_ID_PATTERN: &str = r"^[\w-]+_[0-9a-zA-Z]+$";

/// Validate a complete settings value
pub fn validate_settings(settings: &Settings) -> ConfigResult<()> {
    if let Some(url) = &settings.endpoint_url {
        if url.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint_url must not be empty".to_string()));
        }
    }

    settings.attributes.validate()
}

/// Whether a string has the shape of a user pool id.
///
/// Malformed ids are still passed to the provider, which rejects them.
pub fn looks_like_pool_id(pool_id: &str) -> bool {
    Regex::new(POOL_ID_PATTERN)
        .map(|re| re.is_match(pool_id))
        .unwrap_or(false)
}

/// Region prefix of a well-formed user pool id
pub fn region_from_pool_id(pool_id: &str) -> Option<&str> {
    if !looks_like_pool_id(pool_id) {
        return None;
    }
    pool_id.split_once('_').map(|(region, _)| region)
}

/// Resolve the region from settings, the environment, the shared AWS
/// config file, or the pool id
pub fn resolve_region(
    settings: &Settings,
    pool_id: Option<&str>,
    profile_region: Option<&str>,
) -> Option<String> {
    resolve_region_with(settings, pool_id, profile_region, |key| env::var(key).ok())
}

/// Region resolution with an injectable environment lookup.
///
/// Blank values are skipped so a later source still applies.
pub fn resolve_region_with<F>(
    settings: &Settings,
    pool_id: Option<&str>,
    profile_region: Option<&str>,
    lookup: F,
) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |value: Option<String>| value.filter(|region| !region.trim().is_empty());

    non_blank(settings.region.clone())
        .or_else(|| non_blank(lookup("AWS_REGION")))
        .or_else(|| non_blank(lookup("AWS_DEFAULT_REGION")))
        .or_else(|| non_blank(profile_region.map(str::to_string)))
        .or_else(|| pool_id.and_then(region_from_pool_id).map(str::to_string))
}
