//! Format specifier value type.
//!
//! A `FormatSpec` is constructed fresh for every replacement field and
//! discarded after the field is rendered; it has no persistent identity.

/// Field alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// No explicit alignment; behaves as [`Align::Right`].
    #[default]
    Default,
    /// `<`: content first, fill after.
    Left,
    /// `>`: fill first, content after.
    Right,
    /// `^`: content in the middle, surplus fill on the right.
    Center,
    /// `=`: fill between the sign (and base prefix) and the digits.
    /// Only legal for numeric argument kinds.
    Numeric,
}

/// A parsed `{index:spec}` format specifier.
///
/// Invariant: `width <= i32::MAX` (the parser rejects larger digit runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub align: Align,
    /// Reserve a sign slot for non-negative values (`+` or space flag).
    pub sign: bool,
    /// Fill the sign slot with `+` rather than a space.
    pub plus: bool,
    /// Alternate form: base prefix for hex/octal rendering.
    pub hash: bool,
    pub width: usize,
    pub fill: u8,
    /// Trailing type code, or `None` for the kind's default rendering.
    pub type_code: Option<u8>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            align: Align::Default,
            sign: false,
            plus: false,
            hash: false,
            width: 0,
            fill: b' ',
            type_code: None,
        }
    }
}

impl FormatSpec {
    /// Specifier requesting only a minimum field width.
    pub fn with_width(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Sign byte to show for a non-negative value, if any.
    pub(crate) fn positive_sign(&self) -> Option<u8> {
        if self.sign {
            Some(if self.plus { b'+' } else { b' ' })
        } else {
            None
        }
    }
}
