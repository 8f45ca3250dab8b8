use crate::types::GateMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible chat-completions API
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the Tavily search API
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub max_results: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle for longer than this are evicted
    pub idle_ttl_secs: u64,
    /// Interval between eviction sweeps
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default)]
    pub mode: GateMode,
}

fn default_timeout_secs() -> u64 {
    30
}

impl SystemConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SystemConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }
        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model must not be empty");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            );
        }
        if self.llm.max_tokens == 0 {
            anyhow::bail!("llm.max_tokens must be non-zero");
        }
        if self.search.max_results == 0 {
            anyhow::bail!("search.max_results must be non-zero");
        }
        if self.session.idle_ttl_secs == 0 {
            anyhow::bail!("session.idle_ttl_secs must be non-zero");
        }
        if self.session.sweep_interval_secs == 0 {
            anyhow::bail!("session.sweep_interval_secs must be non-zero");
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            llm: LlmConfig {
                api_base: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.1,
                max_tokens: 1000,
                api_key_env: "OPENAI_API_KEY".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            search: SearchConfig {
                endpoint: "https://api.tavily.com".to_string(),
                api_key_env: "TAVILY_API_KEY".to_string(),
                max_results: 5,
                timeout_secs: default_timeout_secs(),
            },
            session: SessionConfig {
                idle_ttl_secs: 1800,
                sweep_interval_secs: 60,
            },
            gate: GateConfig::default(),
        }
    }
}
