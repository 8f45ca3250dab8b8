use hitl_common::config::SystemConfig;
use hitl_common::types::GateMode;
use std::fs;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.toml");
    fs::write(&config_path, content).unwrap();
    let path = config_path.to_str().unwrap().to_string();
    (temp_dir, path)
}

#[test]
fn test_config_load_from_toml() {
    let config_content = r#"
[server]
host = "127.0.0.1"
port = 8000

[llm]
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini"
temperature = 0.1
max_tokens = 1000
api_key_env = "OPENAI_API_KEY"

[search]
endpoint = "https://api.tavily.com"
api_key_env = "TAVILY_API_KEY"
max_results = 5

[session]
idle_ttl_secs = 1800
sweep_interval_secs = 60

[gate]
mode = "risk_based"
"#;

    let (_dir, path) = write_config(config_content);
    let config = SystemConfig::from_file(&path).unwrap();

    assert_eq!(config.server.port, 8000);
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.search.max_results, 5);
    assert_eq!(config.session.idle_ttl_secs, 1800);
    assert_eq!(config.gate.mode, GateMode::RiskBased);
    // timeout falls back to the default when omitted
    assert_eq!(config.llm.timeout_secs, 30);
}

#[test]
fn test_config_gate_section_optional() {
    let config_content = r#"
[server]
host = "0.0.0.0"
port = 8080

[llm]
api_base = "http://localhost:11434/v1"
model = "llama3"
temperature = 0.5
max_tokens = 512
api_key_env = "OPENAI_API_KEY"

[search]
endpoint = "https://api.tavily.com"
api_key_env = "TAVILY_API_KEY"
max_results = 3

[session]
idle_ttl_secs = 600
sweep_interval_secs = 30
"#;

    let (_dir, path) = write_config(config_content);
    let config = SystemConfig::from_file(&path).unwrap();
    assert_eq!(config.gate.mode, GateMode::RiskBased);
}

#[test]
fn test_config_validation_invalid_temperature() {
    let config_content = r#"
[server]
host = "127.0.0.1"
port = 8000

[llm]
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini"
temperature = 3.0
max_tokens = 1000
api_key_env = "OPENAI_API_KEY"

[search]
endpoint = "https://api.tavily.com"
api_key_env = "TAVILY_API_KEY"
max_results = 5

[session]
idle_ttl_secs = 1800
sweep_interval_secs = 60
"#;

    let (_dir, path) = write_config(config_content);
    let result = SystemConfig::from_file(&path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("temperature"));
}

#[test]
fn test_config_validation_zero_max_results() {
    let config_content = r#"
[server]
host = "127.0.0.1"
port = 8000

[llm]
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini"
temperature = 0.1
max_tokens = 1000
api_key_env = "OPENAI_API_KEY"

[search]
endpoint = "https://api.tavily.com"
api_key_env = "TAVILY_API_KEY"
max_results = 0

[session]
idle_ttl_secs = 1800
sweep_interval_secs = 60
"#;

    let (_dir, path) = write_config(config_content);
    let result = SystemConfig::from_file(&path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("max_results"));
}

#[test]
fn test_config_validation_zero_ttl() {
    let mut config = SystemConfig::default();
    config.session.idle_ttl_secs = 0;

    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("idle_ttl_secs"));
}

#[test]
fn test_default_config_is_valid() {
    SystemConfig::default().validate().unwrap();
}
