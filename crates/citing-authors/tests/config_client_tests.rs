//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use citing_authors::client::EutilsClient;
use citing_authors::config::{Config, api};
use citing_authors::models::GroupingMode;

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_has_no_api_key() {
    let config = Config::default();
    assert!(!config.has_api_key());
    assert_eq!(config.eutils_url, api::EUTILS_URL);
}

#[test]
fn test_config_with_api_key() {
    let config = Config::new(Some("test-key".to_string()));
    assert!(config.has_api_key());
    assert_eq!(config.api_key.as_deref(), Some("test-key"));
}

#[test]
fn test_config_debug_hides_api_key() {
    let config = Config::new(Some("super-secret-key".to_string()));
    let debug = format!("{config:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains("has_api_key: true"));
}

#[test]
fn test_config_defaults_to_strict_grouping() {
    assert_eq!(Config::default().grouping_mode, GroupingMode::Strict);
    assert_eq!(
        Config::default().with_grouping_mode(GroupingMode::Truncate).grouping_mode,
        GroupingMode::Truncate
    );
}

#[test]
fn test_grouping_mode_parses_cli_names() {
    assert_eq!("strict".parse::<GroupingMode>().unwrap(), GroupingMode::Strict);
    assert_eq!("truncate".parse::<GroupingMode>().unwrap(), GroupingMode::Truncate);
    assert!("lenient".parse::<GroupingMode>().is_err());
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_client_creation_succeeds() {
    assert!(EutilsClient::new(&Config::default()).is_ok());
}

#[test]
fn test_client_reports_api_key_status() {
    let client = EutilsClient::new(&Config::new(Some("key".to_string()))).unwrap();
    assert!(client.has_api_key());

    let client_no_key = EutilsClient::new(&Config::default()).unwrap();
    assert!(!client_no_key.has_api_key());
}

#[test]
fn test_client_debug_hides_api_key() {
    let client = EutilsClient::new(&Config::new(Some("super-secret-key".to_string()))).unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains("has_api_key"));
}

#[test]
fn test_client_points_at_configured_base() {
    let client = EutilsClient::new(&Config::for_testing("http://127.0.0.1:9/")).unwrap();
    assert!(format!("{client:?}").contains("http://127.0.0.1:9\""));
}
