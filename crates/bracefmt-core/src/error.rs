//! Formatting errors.
//!
//! Every failure is a caller-input error: a malformed template, an
//! argument/specifier mismatch, or an out-of-range index. All of them
//! abort the formatting call immediately. Each variant carries the byte
//! offset into the template where the offending construct was found.

use thiserror::Error;

/// Error raised while parsing a format template or rendering arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A `{` without a matching `}`, or a bare `}` outside a field.
    #[error("unmatched '{brace}' in format at byte {pos}")]
    UnmatchedBrace { pos: usize, brace: char },

    /// A template used both `{0}`-style and `{}`-style fields.
    #[error("cannot mix automatic and manual argument indexing at byte {pos}")]
    IndexingModeConflict { pos: usize },

    /// A field named an argument the caller did not supply.
    #[error("argument index {index} is out of range ({len} arguments) at byte {pos}")]
    ArgumentIndexOutOfRange {
        pos: usize,
        index: usize,
        len: usize,
    },

    /// A field started with a byte that is neither a digit, `:`, nor `}`.
    #[error("invalid argument index in format at byte {pos}")]
    InvalidArgumentIndex { pos: usize },

    /// A width, precision, or index digit run exceeded `i32::MAX`.
    #[error("number is too big in format at byte {pos}")]
    NumberTooBig { pos: usize },

    /// A nested precision argument resolved to a negative value.
    #[error("negative precision in format at byte {pos}")]
    NegativePrecision { pos: usize },

    /// A `.` followed by neither digits nor a nested `{index}` field.
    #[error("missing precision in format at byte {pos}")]
    MissingPrecision { pos: usize },

    /// A nested precision argument was not an integer kind.
    #[error("precision argument is not an integer at byte {pos}")]
    PrecisionNotInteger { pos: usize },

    /// A precision was given for a non-floating-point argument.
    #[error("precision specifier requires floating-point argument at byte {pos}")]
    PrecisionRequiresFloat { pos: usize },

    /// A type code the target kind does not understand.
    #[error("unknown format code '{code}' for {kind} at byte {pos}")]
    UnknownTypeForKind {
        pos: usize,
        code: char,
        kind: &'static str,
    },

    /// A string argument carried a null payload.
    #[error("string pointer is null at byte {pos}")]
    NullStringPointer { pos: usize },

    /// A sign specifier on an argument kind that cannot carry one.
    #[error("format specifier '{sign}' is not allowed for {kind} argument at byte {pos}")]
    SignNotAllowedForKind {
        pos: usize,
        sign: char,
        kind: &'static str,
    },

    /// `#` on a non-numeric argument.
    #[error("alternate form '#' is not allowed for {kind} argument at byte {pos}")]
    AlternateFormNotAllowedForKind { pos: usize, kind: &'static str },

    /// `=` alignment or `0` padding on a non-numeric argument.
    #[error("numeric alignment is not allowed for {kind} argument at byte {pos}")]
    NumericAlignNotAllowedForKind { pos: usize, kind: &'static str },

    /// A fill character that would be ambiguous with the field grammar.
    #[error("invalid fill character '{fill}' at byte {pos}")]
    InvalidFillChar { pos: usize, fill: char },
}

impl FormatError {
    /// Byte offset into the template where the error was detected.
    pub fn position(&self) -> usize {
        match *self {
            FormatError::UnmatchedBrace { pos, .. }
            | FormatError::IndexingModeConflict { pos }
            | FormatError::ArgumentIndexOutOfRange { pos, .. }
            | FormatError::InvalidArgumentIndex { pos }
            | FormatError::NumberTooBig { pos }
            | FormatError::NegativePrecision { pos }
            | FormatError::MissingPrecision { pos }
            | FormatError::PrecisionNotInteger { pos }
            | FormatError::PrecisionRequiresFloat { pos }
            | FormatError::UnknownTypeForKind { pos, .. }
            | FormatError::NullStringPointer { pos }
            | FormatError::SignNotAllowedForKind { pos, .. }
            | FormatError::AlternateFormNotAllowedForKind { pos, .. }
            | FormatError::NumericAlignNotAllowedForKind { pos, .. }
            | FormatError::InvalidFillChar { pos, .. } => pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_construct() {
        let err = FormatError::UnknownTypeForKind {
            pos: 3,
            code: 'q',
            kind: "integer",
        };
        assert_eq!(err.to_string(), "unknown format code 'q' for integer at byte 3");
    }

    #[test]
    fn test_position_accessor() {
        let err = FormatError::NumberTooBig { pos: 17 };
        assert_eq!(err.position(), 17);
        let err = FormatError::UnmatchedBrace { pos: 0, brace: '}' };
        assert_eq!(err.position(), 0);
    }
}
