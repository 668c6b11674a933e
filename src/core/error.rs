use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("Configuration error: {0}")] Config(String),

    #[error("Query error: {0}")] Query(String),

    #[error("Aggregation error: {0}")] Aggregation(String),

    #[error("Database error: {0}")] Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")] Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")] Io(#[from] std::io::Error),

    #[error("Blocking task error: {0}")] Task(String),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("Unknown error: {0}")] Unknown(String),
}

impl IntelError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            IntelError::Query(_) => true,
            IntelError::Aggregation(_) => true,
            IntelError::InvalidInput(_) => true,
            _ => false,
        }
    }

    pub fn is_critical(&self) -> bool {
        match self {
            IntelError::Config(_) => true,
            IntelError::Database(_) => true,
            IntelError::Io(_) => true,
            _ => false,
        }
    }
}

pub type IntelResult<T> = Result<T, IntelError>;
