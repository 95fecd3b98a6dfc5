//! Request parameter parsing
//!
//! protoc hands plugins a single comma-separated string such as
//! `allow_merge,file=./foo.pb,Mfoo/bar.proto=example.com/foo/bar`.
//! Each token is either applied to a flag or, when its key starts with `M`,
//! recorded as a package mapping.

use crate::flags::{FlagRegistry, FlagSet};
use protoc_gen_swagger_common::{
    flag_names, GeneratorError, PackageMap, Result, SwaggerOptions,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Key prefix marking a `M<proto file>=<import path>` package mapping
pub const PACKAGE_MAP_PREFIX: char = 'M';

/// Value given to a token that has no `=`
const BARE_VALUE: &str = "true";

/// Result of parsing a request parameter on a fresh registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedParams {
    pub options: SwaggerOptions,
    pub package_map: BTreeMap<String, String>,
}

/// Apply a request parameter to `flags` and `pkg_map`
///
/// Tokens are processed left to right and processing stops at the first
/// token that cannot be applied. Tokens applied before the failure keep
/// their effect.
///
/// # Examples
/// ```
/// use protoc_gen_swagger_params::{parse_req_param, FlagRegistry, PackageMap};
///
/// let mut flags = FlagRegistry::swagger();
/// let mut pkg_map = PackageMap::new();
/// parse_req_param("allow_merge,Ma/b.proto=example.com/a/b", &mut flags, &mut pkg_map)?;
///
/// assert!(flags.options().allow_merge);
/// assert_eq!(pkg_map["a/b.proto"], "example.com/a/b");
/// # Ok::<(), protoc_gen_swagger_common::GeneratorError>(())
/// ```
pub fn parse_req_param<F>(param: &str, flags: &mut F, pkg_map: &mut PackageMap) -> Result<()>
where
    F: FlagSet + ?Sized,
{
    for token in param.split(',') {
        if token.is_empty() {
            continue;
        }

        // Only `M<path>=<import>` is a mapping; a bare `Mfoo` names a flag
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => {
                if let Some(path) = key
                    .strip_prefix(PACKAGE_MAP_PREFIX)
                    .filter(|path| !path.is_empty())
                {
                    debug!(proto_file = path, import_path = value, "package mapping");
                    pkg_map.insert(path.to_string(), value.to_string());
                    continue;
                }
                (key, value)
            }
            None => (token, BARE_VALUE),
        };

        if let Err(source) = flags.set(key, value) {
            warn!(token, error = %source, "rejected request parameter");
            return Err(GeneratorError::SetFlag {
                token: token.to_string(),
                source,
            });
        }
        debug!(flag = key, value, "flag set");
    }

    Ok(())
}

/// Parse a request parameter against the default protoc-gen-swagger flags
///
/// # Examples
/// ```
/// use protoc_gen_swagger_params::parse_options;
///
/// let parsed = parse_options("merge_file_name=api,allow_merge")?;
/// assert_eq!(parsed.options.merge_file_name, "api");
/// assert!(parsed.options.allow_merge);
/// assert!(parsed.package_map.is_empty());
/// # Ok::<(), protoc_gen_swagger_common::GeneratorError>(())
/// ```
pub fn parse_options(param: &str) -> Result<ParsedParams> {
    let mut flags = FlagRegistry::swagger();
    let mut pkg_map = PackageMap::new();
    parse_req_param(param, &mut flags, &mut pkg_map)?;

    Ok(ParsedParams {
        options: flags.options(),
        package_map: pkg_map.into_iter().collect(),
    })
}

/// Render options and package mappings as a request parameter
///
/// Every flag is written as `name=value` in declaration order, followed by
/// the package mappings sorted by proto file path. Values containing `,`
/// cannot be represented, nor can proto file paths containing `=`: the
/// path `a=b.proto` is written as `Ma=b.proto=x` and reads back as `a`.
///
/// # Examples
/// ```
/// use protoc_gen_swagger_common::{PackageMap, SwaggerOptions};
/// use protoc_gen_swagger_params::format_req_param;
///
/// let param = format_req_param(&SwaggerOptions::default(), &PackageMap::new());
/// assert_eq!(
///     param,
///     "allow_delete_body=false,allow_merge=false,allow_repeated_fields_in_body=false,\
///      file=stdin,import_prefix=,merge_file_name=apidocs"
/// );
/// ```
pub fn format_req_param(options: &SwaggerOptions, pkg_map: &PackageMap) -> String {
    let mut tokens = vec![
        format!("{}={}", flag_names::ALLOW_DELETE_BODY, options.allow_delete_body),
        format!("{}={}", flag_names::ALLOW_MERGE, options.allow_merge),
        format!(
            "{}={}",
            flag_names::ALLOW_REPEATED_FIELDS_IN_BODY,
            options.allow_repeated_fields_in_body
        ),
        format!("{}={}", flag_names::FILE, options.file),
        format!("{}={}", flag_names::IMPORT_PREFIX, options.import_prefix),
        format!("{}={}", flag_names::MERGE_FILE_NAME, options.merge_file_name),
    ];

    let mut mappings: Vec<(&String, &String)> = pkg_map.iter().collect();
    mappings.sort();
    tokens.extend(
        mappings
            .into_iter()
            .map(|(path, import)| format!("{}{}={}", PACKAGE_MAP_PREFIX, path, import)),
    );

    tokens.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MockFlagSet;
    use mockall::Sequence;
    use protoc_gen_swagger_common::FlagError;

    #[test]
    fn test_empty_param_touches_nothing() {
        let mut flags = MockFlagSet::new();
        flags.expect_set().never();
        let mut pkg_map = PackageMap::new();

        parse_req_param("", &mut flags, &mut pkg_map).unwrap();
        assert!(pkg_map.is_empty());
    }

    #[test]
    fn test_tokens_applied_in_order() {
        let mut flags = MockFlagSet::new();
        let mut seq = Sequence::new();
        flags
            .expect_set()
            .withf(|name, value| name == "allow_merge" && value == "true")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        flags
            .expect_set()
            .withf(|name, value| name == "import_prefix" && value == "a=b")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut pkg_map = PackageMap::new();
        parse_req_param(
            "allow_merge,,Mx.proto=example.com/x,import_prefix=a=b,",
            &mut flags,
            &mut pkg_map,
        )
        .unwrap();

        assert_eq!(pkg_map.len(), 1);
        assert_eq!(pkg_map["x.proto"], "example.com/x");
    }

    #[test]
    fn test_stops_at_first_failure() {
        let mut flags = MockFlagSet::new();
        let mut seq = Sequence::new();
        flags
            .expect_set()
            .withf(|name, _| name == "first")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        flags
            .expect_set()
            .withf(|name, _| name == "second")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name, _| Err(FlagError::NoSuchFlag(name.to_string())));

        let mut pkg_map = PackageMap::new();
        let err = parse_req_param("first=1,second=2,third=3", &mut flags, &mut pkg_map)
            .unwrap_err();

        assert_eq!(err.to_string(), "Cannot set flag second=2: no such flag -second");
    }

    #[test]
    fn test_bare_mapping_token_is_a_flag() {
        let mut flags = MockFlagSet::new();
        flags
            .expect_set()
            .withf(|name, value| name == "Mfoo" && value == "true")
            .times(1)
            .returning(|name, _| Err(FlagError::NoSuchFlag(name.to_string())));
        let mut pkg_map = PackageMap::new();

        let err = parse_req_param("Mfoo", &mut flags, &mut pkg_map).unwrap_err();
        assert_eq!(err.to_string(), "Cannot set flag Mfoo: no such flag -Mfoo");
        assert!(pkg_map.is_empty());
    }

    #[test]
    fn test_empty_mapping_path_is_a_flag() {
        let mut flags = FlagRegistry::swagger();
        let mut pkg_map = PackageMap::new();

        let err = parse_req_param("M=example.com/x", &mut flags, &mut pkg_map).unwrap_err();
        assert_eq!(err.to_string(), "Cannot set flag M=example.com/x: no such flag -M");
        assert!(pkg_map.is_empty());
    }

    #[test]
    fn test_last_mapping_wins() {
        let mut flags = FlagRegistry::swagger();
        let mut pkg_map = PackageMap::new();

        parse_req_param(
            "Ma.proto=example.com/one,Ma.proto=example.com/two",
            &mut flags,
            &mut pkg_map,
        )
        .unwrap();
        assert_eq!(pkg_map.len(), 1);
        assert_eq!(pkg_map["a.proto"], "example.com/two");
        assert_eq!(flags.options(), SwaggerOptions::default());
    }

    #[test]
    fn test_error_source_is_flag_error() {
        let mut flags = FlagRegistry::swagger();
        let mut pkg_map = PackageMap::new();

        let err = parse_req_param("allow_merge=maybe", &mut flags, &mut pkg_map).unwrap_err();
        match err {
            GeneratorError::SetFlag { token, source } => {
                assert_eq!(token, "allow_merge=maybe");
                assert_eq!(source, FlagError::InvalidBool("maybe".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_format_includes_sorted_mappings() {
        let mut pkg_map = PackageMap::new();
        pkg_map.insert("z.proto".to_string(), "example.com/z".to_string());
        pkg_map.insert("a.proto".to_string(), "example.com/a".to_string());
        let options = SwaggerOptions {
            allow_merge: true,
            ..SwaggerOptions::default()
        };

        let param = format_req_param(&options, &pkg_map);
        assert!(param.contains("allow_merge=true"));
        assert!(param.ends_with("Ma.proto=example.com/a,Mz.proto=example.com/z"));
    }
}
