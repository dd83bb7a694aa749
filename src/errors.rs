/// Domain-specific error types for the payoff service.
/// A full portfolio is deliberately absent: that add is a silent no-op.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid contract input: {0}")]
    InvalidInput(String),

    #[error("invalid price domain: {0}")]
    InvalidDomain(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Parse(e.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
