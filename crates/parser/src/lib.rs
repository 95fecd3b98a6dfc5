//! Request parameter handling for protoc-gen-swagger
//!
//! protoc passes plugin options as one comma-separated string. This crate
//! applies that string to a registry of typed flags and collects the
//! package mappings used to resolve cross-file type references.
//!
//! ## Parameter format
//!
//! `key[=value](,key[=value])*`
//! - `name=value` sets the flag `name`
//! - a bare `name` sets the flag to `true`
//! - `M<proto file>=<import path>` records a package mapping
//! - empty tokens are ignored
//!
//! Processing stops at the first token that cannot be applied; tokens
//! before it stay applied.

mod flags;
mod plugin;
mod request;

pub use flags::{parse_bool, Flag, FlagKind, FlagRegistry, FlagSet, FlagValue};
pub use plugin::PluginRequest;
pub use request::{
    format_req_param, parse_options, parse_req_param, ParsedParams, PACKAGE_MAP_PREFIX,
};

pub use protoc_gen_swagger_common::{
    FlagError, GeneratorError, PackageMap, Result, SwaggerOptions,
};
