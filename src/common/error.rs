use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Feed fetch failed: {0}")]
    Fetch(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Malformed date in '{field}': '{value}' ({reason})")]
    MalformedDate {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid event id: {value}")]
    InvalidId { value: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Field '{0}' is not text")]
    InvalidField(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AgendaError {
    fn from(e: reqwest::Error) -> Self {
        AgendaError::Fetch(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;
