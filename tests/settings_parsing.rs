//! Integration tests for settings files

use cogctl::attributes::QuotaInput;
use cogctl::config::{load_settings, parse_settings, resolve_region_with, validate_settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_complete_settings() {
    let yaml = r#"
region: eu-west-1
endpoint_url: http://localhost:9229
user_pool_id: eu-west-1_Test01
client_id: 4cl13nt

attributes:
  num_dapps: "dev:num_dapps"
  standard_limit: null
  professional_limit: null
  enterprise_limit: null
  payment_provider: null
  payment_status: null
  email: false
"#;

    let settings = parse_settings(yaml).unwrap();
    validate_settings(&settings).unwrap();

    assert_eq!(settings.endpoint_url.as_deref(), Some("http://localhost:9229"));
    assert_eq!(
        resolve_region_with(&settings, settings.user_pool_id.as_deref(), None, |_| None),
        Some("eu-west-1".to_string())
    );

    let attrs = settings
        .attributes
        .build("a@b.com", &QuotaInput::new(6))
        .unwrap();
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].name, "dev:num_dapps");
    assert_eq!(attrs[0].value, "6");
}

#[test]
fn test_blank_attribute_name_fails_validation() {
    let yaml = r#"
attributes:
  num_dapps: ""
"#;
    let settings = parse_settings(yaml).unwrap();
    assert!(validate_settings(&settings).is_err());
}

#[test]
fn test_malformed_yaml() {
    assert!(parse_settings("region: [unterminated").is_err());
}

#[test]
fn test_load_explicit_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("team.yaml");
    fs::write(&path, "user_pool_id: us-east-2_Team\n").unwrap();

    let (settings, found) = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.user_pool_id.as_deref(), Some("us-east-2_Team"));
    assert_eq!(found.as_deref(), Some(path.as_path()));
}
