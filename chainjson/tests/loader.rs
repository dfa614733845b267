// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use chainjson::{
    parse_file, parse_file_with_config, JsonValue, LoadError, ParseError, ParserConfig,
};
use tempfile::NamedTempFile;
use test_log::test;

fn temp_json(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_parse_file() {
    let file = temp_json(br#"{"id": 7, "tags": ["a", "b"]}"#);
    let value = parse_file(file.path()).unwrap();
    assert_eq!(value.get("id"), Some(&JsonValue::from(7)));
    assert_eq!(
        value.get("tags").and_then(JsonValue::as_array).map(|a| a.len()),
        Some(2)
    );
}

#[test]
fn test_parse_file_with_config() {
    let file = temp_json(br#"["x\ty"; 1]"#);
    assert!(matches!(
        parse_file(file.path()),
        Err(LoadError::Parse(ParseError::ExpectedSeparator { .. }))
    ));

    let value = parse_file_with_config(file.path(), ParserConfig::lenient()).unwrap();
    assert_eq!(value.get_index(0).and_then(JsonValue::as_str), Some(r"x\ty"));
}

#[test]
fn test_parse_file_invalid_utf8() {
    let file = temp_json(&[b'[', b'"', 0xC3, 0x28, b'"', b']']);
    match parse_file(file.path()) {
        Err(LoadError::Parse(ParseError::InvalidUtf8(_))) => {}
        other => panic!("Expected InvalidUtf8, got {other:?}"),
    }
}

#[test]
fn test_parse_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let error = parse_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(error, LoadError::Io(_)));
    assert!(std::error::Error::source(&error).is_some());
}
