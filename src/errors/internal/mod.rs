use thiserror::Error;

pub mod database;

pub use database::DatabaseError;

/// Internal error type for store and service operations
///
/// Not exposed via API - the coordinator and API layer convert internal
/// errors into stable error classifications with generic messages.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn missing_row(operation: &str) -> InternalError {
        InternalError::Database(DatabaseError::MissingRow {
            operation: operation.to_string(),
        })
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }
}
