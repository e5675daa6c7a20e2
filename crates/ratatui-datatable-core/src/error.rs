//! Construction-time errors.
//!
//! Runtime table operations never fail: out-of-range pages clamp and unknown columns or row ids
//! are ignored. Only invalid configuration is reported.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two columns share the same key, so sort state could not tell them apart.
    #[error("duplicate column key `{key}`")]
    DuplicateColumn { key: String },

    #[error("page size options must not be empty")]
    EmptyPageSizeOptions,

    #[error("page size options must be greater than zero")]
    ZeroPageSizeOption,
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
