use num_bigint::BigUint;
use std::fmt;
use thiserror::Error;

/// Precondition failures of the extraction and classification core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No digit run in the text, so there is no bound to size the sequence.
    #[error("no integers found in text")]
    EmptyInput,

    #[error("no Fibonacci neighbor for {number} in a prefix of length {len}")]
    PrefixTooShort { number: BigUint, len: usize },
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorageError {
    pub fn database<E: fmt::Display>(err: E) -> Self {
        Self::Database(err.to_string())
    }

    pub fn http<E: fmt::Display>(err: E) -> Self {
        Self::Http(err.to_string())
    }

    pub fn configuration<E: fmt::Display>(err: E) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::database(err)
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        Self::http(err)
    }
}
