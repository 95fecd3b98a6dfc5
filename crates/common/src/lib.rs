//! Common types and utilities for protoc-gen-swagger request parameters
//!
//! This crate contains the error types, the typed option snapshot and the
//! package mapping shared by the parameter parser and the CLI.

mod options;

pub use options::{flag_names, SwaggerOptions};

use std::collections::HashMap;
use thiserror::Error;

/// Proto file path -> import path overrides, filled from `M<path>=<import>` tokens
pub type PackageMap = HashMap<String, String>;

/// Errors reported by a flag registry when setting a flag by name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("no such flag -{0}")]
    NoSuchFlag(String),

    #[error("parsing {0:?}: invalid boolean syntax")]
    InvalidBool(String),
}

/// Errors that can occur while handling a plugin request
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Cannot set flag {token}: {source}")]
    SetFlag {
        token: String,
        #[source]
        source: FlagError,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for request parameter operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
