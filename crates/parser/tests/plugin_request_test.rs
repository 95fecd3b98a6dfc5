//! Integration tests for plugin request decoding

use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use protoc_gen_swagger_params::{GeneratorError, PluginRequest};
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_request() -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec![
            "example/v1/service.proto".to_string(),
            "example/v1/types.proto".to_string(),
        ],
        parameter: Some(
            "allow_merge,merge_file_name=example,Mexample/v1/types.proto=example.com/types"
                .to_string(),
        ),
        ..Default::default()
    }
}

#[test]
fn test_request_from_bytes() {
    let bytes = sample_request().encode_to_vec();
    let request = PluginRequest::from_bytes(&bytes).unwrap();

    assert_eq!(request.files_to_generate().len(), 2);
    assert_eq!(request.files_to_generate()[0], "example/v1/service.proto");

    let parsed = request.parse().unwrap();
    assert!(parsed.options.allow_merge);
    assert_eq!(parsed.options.merge_file_name, "example");
    assert_eq!(
        parsed.package_map.get("example/v1/types.proto").map(String::as_str),
        Some("example.com/types")
    );
}

#[test]
fn test_request_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&sample_request().encode_to_vec()).unwrap();

    let request = PluginRequest::from_file(file.path()).unwrap();
    assert_eq!(request.inner(), &sample_request());
    assert_eq!(request.parameter(), sample_request().parameter());
}

#[test]
fn test_request_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PluginRequest::from_file(dir.path().join("missing.pb")).unwrap_err();

    match &err {
        GeneratorError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("IO error: "));
    assert!(err.to_string().contains("missing.pb"));
}

#[test]
fn test_request_with_bad_parameter() {
    let request = PluginRequest::from(CodeGeneratorRequest {
        parameter: Some("allow_delete_body=yes".to_string()),
        ..Default::default()
    });

    let err = request.parse().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot set flag allow_delete_body=yes: parsing \"yes\": invalid boolean syntax"
    );
}
