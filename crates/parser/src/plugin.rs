//! protoc plugin request handling
//!
//! protoc sends a serialized `CodeGeneratorRequest` to the plugin; its
//! `parameter` field carries the request parameter string.

use crate::request::{parse_options, ParsedParams};
use protoc_gen_swagger_common::{GeneratorError, Result};
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A decoded plugin request
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRequest {
    request: CodeGeneratorRequest,
}

impl PluginRequest {
    /// Load a serialized CodeGeneratorRequest from a file
    ///
    /// # Example
    /// ```rust,ignore
    /// let request = PluginRequest::from_file("request.pb")?;
    /// let parsed = request.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;

        Self::from_bytes(&bytes)
    }

    /// Decode a CodeGeneratorRequest from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let request = CodeGeneratorRequest::decode(bytes).map_err(|e| {
            GeneratorError::Decode(format!("Failed to decode CodeGeneratorRequest: {}", e))
        })?;

        debug!(
            files = request.file_to_generate.len(),
            parameter = request.parameter(),
            "decoded plugin request"
        );
        Ok(Self { request })
    }

    /// Raw request parameter, empty when protoc sent none
    pub fn parameter(&self) -> &str {
        self.request.parameter()
    }

    /// Proto files protoc asked the plugin to generate
    pub fn files_to_generate(&self) -> &[String] {
        &self.request.file_to_generate
    }

    /// Parse the request parameter against the default flags
    pub fn parse(&self) -> Result<ParsedParams> {
        parse_options(self.parameter())
    }

    /// Get reference to the underlying request
    pub fn inner(&self) -> &CodeGeneratorRequest {
        &self.request
    }
}

impl From<CodeGeneratorRequest> for PluginRequest {
    fn from(request: CodeGeneratorRequest) -> Self {
        Self { request }
    }
}
