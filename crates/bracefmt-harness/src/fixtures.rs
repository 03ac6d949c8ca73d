//! Fixture loading and management.
//!
//! A fixture case pairs a template and JSON-typed arguments with either
//! an expected rendering or an expected error-message substring. The
//! built-in suite covers the engine's documented scenarios; external
//! sets load from JSON files with the same schema.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bracefmt_core::FormatArg;

/// Typed argument as it appears in fixture JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgSpec {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F64(f64),
    LongDouble(f64),
    Char(u8),
    Str(String),
    /// Null string payload handed over from a C boundary.
    NullStr,
    Pointer(usize),
}

impl ArgSpec {
    /// Borrowed engine argument referencing this spec's storage.
    pub fn as_arg(&self) -> FormatArg<'_> {
        match self {
            ArgSpec::I32(v) => FormatArg::Int(*v),
            ArgSpec::U32(v) => FormatArg::Uint(*v),
            ArgSpec::I64(v) => FormatArg::Long(*v),
            ArgSpec::U64(v) => FormatArg::Ulong(*v),
            ArgSpec::F64(v) => FormatArg::Double(*v),
            ArgSpec::LongDouble(v) => FormatArg::LongDouble(*v),
            ArgSpec::Char(v) => FormatArg::Char(*v),
            ArgSpec::Str(v) => FormatArg::Str(Some(v.as_bytes())),
            ArgSpec::NullStr => FormatArg::Str(None),
            ArgSpec::Pointer(v) => FormatArg::Pointer(*v),
        }
    }
}

/// A single conformance case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Template handed to the engine.
    pub template: String,
    /// Ordered arguments.
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    /// Expected rendering (UTF-8) on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Substring expected in the error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Suite name.
    pub suite: String,
    /// Individual cases.
    pub cases: Vec<FixtureCase>,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl FixtureSet {
    /// Load a fixture set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the fixture set to pretty JSON.
    pub fn to_json(&self) -> Result<String, FixtureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The built-in conformance suite.
    pub fn builtin() -> Self {
        fn ok(name: &str, template: &str, args: Vec<ArgSpec>, expected: &str) -> FixtureCase {
            FixtureCase {
                name: name.into(),
                template: template.into(),
                args,
                expected: Some(expected.into()),
                expected_error: None,
            }
        }
        fn fails(name: &str, template: &str, args: Vec<ArgSpec>, message: &str) -> FixtureCase {
            FixtureCase {
                name: name.into(),
                template: template.into(),
                args,
                expected: None,
                expected_error: Some(message.into()),
            }
        }

        FixtureSet {
            version: "1".into(),
            suite: "builtin".into(),
            cases: vec![
                ok(
                    "manual_index_strings",
                    "{0}, {1}!",
                    vec![ArgSpec::Str("Hello".into()), ArgSpec::Str("World".into())],
                    "Hello, World!",
                ),
                ok(
                    "forced_sign_fixed",
                    "{:+.2f}",
                    vec![ArgSpec::F64(3.14159)],
                    "+3.14",
                ),
                ok(
                    "center_alignment",
                    "{:^10}",
                    vec![ArgSpec::Str("ab".into())],
                    "    ab    ",
                ),
                ok(
                    "hex_zero_pad_prefix",
                    "{:#06x}",
                    vec![ArgSpec::I32(255)],
                    "0x00ff",
                ),
                ok(
                    "automatic_indexing",
                    "{} {} {}",
                    vec![ArgSpec::I32(1), ArgSpec::U32(2), ArgSpec::I64(3)],
                    "1 2 3",
                ),
                ok("escaped_braces", "{{}}", vec![], "{}"),
                ok(
                    "negative_hex_bit_pattern",
                    "{:x}",
                    vec![ArgSpec::I32(-1)],
                    "ffffffff",
                ),
                ok(
                    "zero_pad_negative",
                    "{:05}",
                    vec![ArgSpec::I32(-42)],
                    "-0042",
                ),
                ok(
                    "precision_from_argument",
                    "{0:.{1}f}",
                    vec![ArgSpec::F64(3.14159), ArgSpec::I32(3)],
                    "3.142",
                ),
                ok(
                    "pointer_alternate_hex",
                    "{}",
                    vec![ArgSpec::Pointer(0xdead)],
                    "0xdead",
                ),
                ok(
                    "char_with_width",
                    "{:5c}",
                    vec![ArgSpec::Char(b'x')],
                    "    x",
                ),
                ok(
                    "unsigned_64_decimal",
                    "{}",
                    vec![ArgSpec::U64(u64::MAX)],
                    "18446744073709551615",
                ),
                fails(
                    "mode_switch_manual_to_auto",
                    "{0}{}",
                    vec![ArgSpec::I32(1), ArgSpec::I32(2)],
                    "cannot mix automatic and manual",
                ),
                fails(
                    "index_out_of_range",
                    "{5}",
                    vec![ArgSpec::I32(1), ArgSpec::I32(2)],
                    "out of range",
                ),
                fails(
                    "null_string_payload",
                    "{}",
                    vec![ArgSpec::NullStr],
                    "string pointer is null",
                ),
                fails(
                    "unknown_code_for_integer",
                    "{:q}",
                    vec![ArgSpec::I32(1)],
                    "unknown format code 'q' for integer",
                ),
                fails(
                    "width_from_argument_unsupported",
                    "{:{1}}",
                    vec![ArgSpec::Str("hi".into()), ArgSpec::I32(5)],
                    "unmatched",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_suite_shape() {
        let set = FixtureSet::builtin();
        assert!(set.cases.len() >= 15);
        for case in &set.cases {
            assert!(
                case.expected.is_some() ^ case.expected_error.is_some(),
                "case {} must expect exactly one outcome",
                case.name
            );
        }
    }

    #[test]
    fn test_fixture_json_round_trip() {
        let set = FixtureSet::builtin();
        let json = set.to_json().unwrap();
        let reloaded = FixtureSet::from_json(&json).unwrap();
        assert_eq!(reloaded.cases.len(), set.cases.len());
        assert_eq!(reloaded.suite, set.suite);
    }

    #[test]
    fn test_arg_spec_json_schema() {
        let json = r#"{"kind": "i32", "value": -7}"#;
        let spec: ArgSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec, ArgSpec::I32(-7)));
        let json = r#"{"kind": "null_str"}"#;
        let spec: ArgSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec, ArgSpec::NullStr));
    }

    #[test]
    fn test_as_arg_borrows_storage() {
        let spec = ArgSpec::Str("abc".into());
        match spec.as_arg() {
            FormatArg::Str(Some(bytes)) => assert_eq!(bytes, b"abc"),
            other => panic!("unexpected arg {other:?}"),
        }
    }
}
