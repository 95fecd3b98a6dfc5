//! Typed snapshot of the plugin options
//!
//! The generator reads these values after the request parameter has been
//! applied to a flag registry.

use serde::{Deserialize, Serialize};

/// Names of the flags understood by the plugin
pub mod flag_names {
    pub const ALLOW_DELETE_BODY: &str = "allow_delete_body";
    pub const ALLOW_MERGE: &str = "allow_merge";
    pub const ALLOW_REPEATED_FIELDS_IN_BODY: &str = "allow_repeated_fields_in_body";
    pub const FILE: &str = "file";
    pub const IMPORT_PREFIX: &str = "import_prefix";
    pub const MERGE_FILE_NAME: &str = "merge_file_name";
}

/// Plugin options after a request parameter has been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwaggerOptions {
    /// Unless set, HTTP DELETE methods may not have a body
    pub allow_delete_body: bool,
    /// Merge all generated documents into a single file
    pub allow_merge: bool,
    /// Allow repeated fields in `body` mappings of HTTP rules
    pub allow_repeated_fields_in_body: bool,
    /// Where to load the CodeGeneratorRequest from
    pub file: String,
    /// Prefix prepended to import paths
    pub import_prefix: String,
    /// Target file name when `allow_merge` is set
    pub merge_file_name: String,
}

impl Default for SwaggerOptions {
    fn default() -> Self {
        Self {
            allow_delete_body: false,
            allow_merge: false,
            allow_repeated_fields_in_body: false,
            file: "stdin".to_string(),
            import_prefix: String::new(),
            merge_file_name: "apidocs".to_string(),
        }
    }
}
