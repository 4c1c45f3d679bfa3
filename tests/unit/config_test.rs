use chatrelay::config::Config;
use validator::Validate;

fn base_config() -> Config {
    Config {
        port: 3000,
        gemini_api_key: "test-key".to_string(),
        gemini_model: "gemini-flash-latest".to_string(),
        gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        log_level: "info".to_string(),
    }
}

#[test]
fn test_valid_config_passes_validation() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn test_empty_api_key_rejected() {
    let mut cfg = base_config();
    cfg.gemini_api_key = String::new();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_zero_port_rejected() {
    let mut cfg = base_config();
    cfg.port = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_deserializes_from_lowercased_env_keys() {
    // The Environment source lowercases variable names; the struct fields
    // must line up with GEMINI_API_KEY, PORT, etc.
    let cfg: Config = serde_json::from_value(serde_json::json!({
        "port": 3000,
        "gemini_api_key": "k",
        "gemini_model": "gemini-flash-latest",
        "gemini_base_url": "http://localhost:9999",
        "log_level": "debug"
    }))
    .unwrap();

    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.gemini_base_url, "http://localhost:9999");
}
