//! Typed flag registry
//!
//! Flags are declared up front with a type and a default, then mutated by
//! name with string values, the way protoc plugin options arrive.

use protoc_gen_swagger_common::{flag_names, FlagError, SwaggerOptions};
use std::fmt;

/// Anything that can set a named flag from its string form
#[cfg_attr(test, mockall::automock)]
pub trait FlagSet {
    /// Parse `value` against the flag's declared type and store it
    fn set(&mut self, name: &str, value: &str) -> Result<(), FlagError>;
}

/// Declared type of a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    String,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagKind::Bool => write!(f, "bool"),
            FlagKind::String => write!(f, "string"),
        }
    }
}

/// Current value of a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    String(String),
}

impl FlagValue {
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Bool(_) => FlagKind::Bool,
            FlagValue::String(_) => FlagKind::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(b) => Some(*b),
            FlagValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::String(s) => Some(s),
            FlagValue::Bool(_) => None,
        }
    }

    /// Parse `raw` as a value of the given kind
    pub fn parse(kind: FlagKind, raw: &str) -> Result<Self, FlagError> {
        match kind {
            FlagKind::Bool => parse_bool(raw).map(FlagValue::Bool),
            FlagKind::String => Ok(FlagValue::String(raw.to_string())),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{}", b),
            FlagValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a boolean flag value
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
///
/// # Examples
/// ```
/// use protoc_gen_swagger_params::parse_bool;
///
/// assert_eq!(parse_bool("True"), Ok(true));
/// assert_eq!(parse_bool("0"), Ok(false));
/// assert!(parse_bool("3").is_err());
/// ```
pub fn parse_bool(raw: &str) -> Result<bool, FlagError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(FlagError::InvalidBool(raw.to_string())),
    }
}

/// A declared flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    name: String,
    usage: String,
    default: FlagValue,
    value: FlagValue,
}

impl Flag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn kind(&self) -> FlagKind {
        self.default.kind()
    }

    pub fn default_value(&self) -> &FlagValue {
        &self.default
    }

    pub fn value(&self) -> &FlagValue {
        &self.value
    }

    /// Whether the current value differs from the default
    pub fn is_modified(&self) -> bool {
        self.value != self.default
    }
}

/// Registry of typed flags, kept in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagRegistry {
    flags: Vec<Flag>,
}

impl FlagRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the options understood by protoc-gen-swagger
    ///
    /// # Examples
    /// ```
    /// use protoc_gen_swagger_params::FlagRegistry;
    ///
    /// let flags = FlagRegistry::swagger();
    /// assert_eq!(flags.get("file").and_then(|v| v.as_str()), Some("stdin"));
    /// assert_eq!(flags.get("allow_merge").and_then(|v| v.as_bool()), Some(false));
    /// ```
    pub fn swagger() -> Self {
        let defaults = SwaggerOptions::default();
        let mut registry = Self::new();
        registry
            .bool(
                flag_names::ALLOW_DELETE_BODY,
                defaults.allow_delete_body,
                "unless set, HTTP DELETE methods may not have a body",
            )
            .bool(
                flag_names::ALLOW_MERGE,
                defaults.allow_merge,
                "merge the documents of every proto into a single file",
            )
            .bool(
                flag_names::ALLOW_REPEATED_FIELDS_IN_BODY,
                defaults.allow_repeated_fields_in_body,
                "accept repeated fields as the `body` of a `google.api.http` rule",
            )
            .string(
                flag_names::FILE,
                &defaults.file,
                "path to read the CodeGeneratorRequest from",
            )
            .string(
                flag_names::IMPORT_PREFIX,
                &defaults.import_prefix,
                "prefix prepended to the import path of imported proto files",
            )
            .string(
                flag_names::MERGE_FILE_NAME,
                &defaults.merge_file_name,
                "file name of the merged document",
            );
        registry
    }

    /// Declare a boolean flag
    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> &mut Self {
        self.define(name, FlagValue::Bool(default), usage)
    }

    /// Declare a string flag
    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> &mut Self {
        self.define(name, FlagValue::String(default.to_string()), usage)
    }

    fn define(&mut self, name: &str, default: FlagValue, usage: &str) -> &mut Self {
        let flag = Flag {
            name: name.to_string(),
            usage: usage.to_string(),
            value: default.clone(),
            default,
        };

        // Redeclaring a flag replaces it in place
        match self.flags.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = flag,
            None => self.flags.push(flag),
        }
        self
    }

    /// Look up a flag by name
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Current value of a flag
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.lookup(name).map(Flag::value)
    }

    /// Restore every flag to its declared default
    pub fn reset(&mut self) {
        for flag in &mut self.flags {
            flag.value = flag.default.clone();
        }
    }

    /// Iterate flags in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Typed snapshot of the swagger options
    ///
    /// Flags missing from the registry, or declared with another type,
    /// fall back to their defaults.
    pub fn options(&self) -> SwaggerOptions {
        let defaults = SwaggerOptions::default();
        let bool_of = |name: &str, default: bool| {
            self.get(name).and_then(FlagValue::as_bool).unwrap_or(default)
        };
        let string_of = |name: &str, default: String| {
            self.get(name)
                .and_then(FlagValue::as_str)
                .map(String::from)
                .unwrap_or(default)
        };

        SwaggerOptions {
            allow_delete_body: bool_of(flag_names::ALLOW_DELETE_BODY, defaults.allow_delete_body),
            allow_merge: bool_of(flag_names::ALLOW_MERGE, defaults.allow_merge),
            allow_repeated_fields_in_body: bool_of(
                flag_names::ALLOW_REPEATED_FIELDS_IN_BODY,
                defaults.allow_repeated_fields_in_body,
            ),
            file: string_of(flag_names::FILE, defaults.file),
            import_prefix: string_of(flag_names::IMPORT_PREFIX, defaults.import_prefix),
            merge_file_name: string_of(flag_names::MERGE_FILE_NAME, defaults.merge_file_name),
        }
    }
}

impl FlagSet for FlagRegistry {
    fn set(&mut self, name: &str, value: &str) -> Result<(), FlagError> {
        let flag = self
            .flags
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FlagError::NoSuchFlag(name.to_string()))?;

        flag.value = FlagValue::parse(flag.default.kind(), value)?;
        Ok(())
    }
}

impl From<&FlagRegistry> for SwaggerOptions {
    fn from(registry: &FlagRegistry) -> Self {
        registry.options()
    }
}
