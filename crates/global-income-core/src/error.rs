use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobalIncomeError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("No reference data: {table} has no entry for '{key}'")]
    DataNotFound { table: &'static str, key: String },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for GlobalIncomeError {
    fn from(e: serde_json::Error) -> Self {
        GlobalIncomeError::SerializationError(e.to_string())
    }
}
