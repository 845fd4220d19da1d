use super::*;
use tempfile::tempdir;

#[test]
fn test_defaults_match_service_constants() {
    let config = AppConfig::default();
    assert_eq!(config.endpoint_host, "m.client.10010.com");
    assert_eq!(config.login.poll_interval_ms, 1000);
    assert_eq!(config.login.max_poll_attempts, 600);
    assert_eq!(config.widget.refresh_interval_secs, 60);
    assert!(config.user_agent.contains("iPhone"));
}

#[test]
fn test_partial_yaml_keeps_other_defaults() {
    let yaml = r#"
endpoint_host: "staging.example.com"
login:
  max_poll_attempts: 30
"#;
    let config = AppConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.endpoint_host, "staging.example.com");
    assert_eq!(config.login.max_poll_attempts, 30);
    assert_eq!(config.login.poll_interval_ms, 1000);
    assert_eq!(config.login_url, DEFAULT_LOGIN_URL);
}

#[test]
fn test_empty_yaml_is_default() {
    assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
}

#[test]
fn test_unknown_field_rejected() {
    let result = AppConfig::from_yaml("endpoint: x\n");
    assert!(result.is_err());
}

#[test]
fn test_zero_values_rejected() {
    for yaml in [
        "login:\n  poll_interval_ms: 0\n",
        "login:\n  max_poll_attempts: 0\n",
        "request_timeout_secs: 0\n",
        "endpoint_host: \"  \"\n",
    ] {
        let err = AppConfig::from_yaml(yaml).unwrap_err();
        assert!(
            format!("{:#}", err).contains("must"),
            "yaml {yaml:?} gave {err:#}"
        );
    }
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = tempdir().unwrap();
    let config = AppConfig::load_or_default(&dir.path().join("config.yaml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_reports_path_on_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "login: [1, 2]\n").unwrap();

    let err = AppConfig::load_or_default(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.yaml"));
}
