//! Error types for the user store
//!
//! Failures of the asynchronous user operations are not errors here; they
//! arrive as Fail actions and end up in `UserState::error`. These types cover
//! the fallible code around the reducer: configuration, dispatch misuse and
//! malformed input.

use thiserror::Error;

use crate::store::Operation;

pub type Result<T> = std::result::Result<T, UserStoreError>;

#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl UserStoreError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            UserStoreError::InvalidInput(_) => 3,
            UserStoreError::Config(_) => 1,
            UserStoreError::Dispatch(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("'{0}' is not a request action")]
    NotARequest(&'static str),

    #[error("'{0}' is not a success or fail action")]
    NotAResolution(&'static str),

    #[error("token {token} was issued for a {expected} request, got a {actual} resolution")]
    OperationMismatch {
        token: u64,
        expected: Operation,
        actual: Operation,
    },

    #[error("token {0} was never issued by this store")]
    UnknownToken(u64),
}
