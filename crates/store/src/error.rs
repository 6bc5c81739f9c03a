//! Error types for store field access.

use std::result;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown store field '{0}'")]
    UnknownField(String),
}

pub type Result<T> = result::Result<T, StoreError>;
