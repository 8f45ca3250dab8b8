use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("No pending action for session: {0}")]
    NoPendingAction(String),

    #[error("Missing API key in environment variable: {0}")]
    MissingApiKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert anyhow errors to AssistantError
impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Unknown(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
