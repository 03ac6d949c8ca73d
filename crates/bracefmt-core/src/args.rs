//! Format arguments.
//!
//! A closed tagged union over the supported argument kinds plus one
//! extensibility variant carrying a bound rendering capability. All
//! variants borrow caller-owned data for the duration of a single
//! formatting call; the engine never copies string or custom payloads.

use core::fmt;

use crate::buffer::OutBuf;
use crate::error::FormatError;
use crate::spec::FormatSpec;
use crate::text;

/// One formatting argument.
#[derive(Clone, Copy)]
pub enum FormatArg<'a> {
    Int(i32),
    Uint(u32),
    Long(i64),
    Ulong(u64),
    Double(f64),
    /// Extended-precision double. The tag is kept for dispatch parity;
    /// the payload is `f64` (no stable wider float type exists).
    LongDouble(f64),
    Char(u8),
    /// Byte string with explicit length. `None` models a null payload
    /// handed over from a C boundary and fails with
    /// [`FormatError::NullStringPointer`].
    Str(Option<&'a [u8]>),
    Pointer(usize),
    /// User-extensible kind: the bound capability does the rendering.
    Custom(&'a dyn Renderable),
}

impl FormatArg<'_> {
    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatArg::Int(_) | FormatArg::Uint(_) | FormatArg::Long(_) | FormatArg::Ulong(_) => {
                "integer"
            }
            FormatArg::Double(_) | FormatArg::LongDouble(_) => "double",
            FormatArg::Char(_) => "char",
            FormatArg::Str(_) => "string",
            FormatArg::Pointer(_) => "pointer",
            FormatArg::Custom(_) => "object",
        }
    }

    /// Numeric kinds may carry sign, alternate form and numeric
    /// alignment specifiers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormatArg::Int(_)
                | FormatArg::Uint(_)
                | FormatArg::Long(_)
                | FormatArg::Ulong(_)
                | FormatArg::Double(_)
                | FormatArg::LongDouble(_)
        )
    }

    /// Kinds for which a precision specifier is legal.
    pub fn is_float(&self) -> bool {
        matches!(self, FormatArg::Double(_) | FormatArg::LongDouble(_))
    }

    /// Pointer-kind argument from an address.
    pub fn pointer(addr: usize) -> Self {
        FormatArg::Pointer(addr)
    }

    /// Custom-kind argument from a rendering capability.
    pub fn custom(value: &dyn Renderable) -> FormatArg<'_> {
        FormatArg::Custom(value)
    }
}

impl fmt::Debug for FormatArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Int(v) => f.debug_tuple("Int").field(v).finish(),
            FormatArg::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            FormatArg::Long(v) => f.debug_tuple("Long").field(v).finish(),
            FormatArg::Ulong(v) => f.debug_tuple("Ulong").field(v).finish(),
            FormatArg::Double(v) => f.debug_tuple("Double").field(v).finish(),
            FormatArg::LongDouble(v) => f.debug_tuple("LongDouble").field(v).finish(),
            FormatArg::Char(v) => f.debug_tuple("Char").field(v).finish(),
            FormatArg::Str(v) => f.debug_tuple("Str").field(v).finish(),
            FormatArg::Pointer(v) => f.debug_tuple("Pointer").field(v).finish(),
            FormatArg::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(value: i32) -> Self {
        FormatArg::Int(value)
    }
}

impl From<u32> for FormatArg<'_> {
    fn from(value: u32) -> Self {
        FormatArg::Uint(value)
    }
}

impl From<i64> for FormatArg<'_> {
    fn from(value: i64) -> Self {
        FormatArg::Long(value)
    }
}

impl From<u64> for FormatArg<'_> {
    fn from(value: u64) -> Self {
        FormatArg::Ulong(value)
    }
}

impl From<f64> for FormatArg<'_> {
    fn from(value: f64) -> Self {
        FormatArg::Double(value)
    }
}

impl From<u8> for FormatArg<'_> {
    fn from(value: u8) -> Self {
        FormatArg::Char(value)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(value: &'a str) -> Self {
        FormatArg::Str(Some(value.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(value: &'a [u8]) -> Self {
        FormatArg::Str(Some(value))
    }
}

impl<'a> From<&'a dyn Renderable> for FormatArg<'a> {
    fn from(value: &'a dyn Renderable) -> Self {
        FormatArg::Custom(value)
    }
}

/// Rendering capability for custom argument kinds.
///
/// The single polymorphic seam of the engine: the implementation
/// receives the parsed specifier and an output sink and is fully
/// responsible for honoring width, alignment and fill.
pub trait Renderable {
    fn render(&self, sink: &mut ArgSink<'_>, spec: &FormatSpec) -> Result<(), FormatError>;
}

/// Restricted buffer handle passed to custom renderers.
///
/// The full [`crate::Formatter`] is not handed out because its
/// `format` entry is not reentrant with respect to the in-flight field.
pub struct ArgSink<'b> {
    buf: &'b mut OutBuf,
}

impl<'b> ArgSink<'b> {
    pub(crate) fn new(buf: &'b mut OutBuf) -> Self {
        Self { buf }
    }

    /// Appends raw bytes without padding.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.append(bytes);
    }

    /// Appends bytes padded and aligned per `spec`, under the same rule
    /// the engine applies to string arguments.
    pub fn write_padded(&mut self, bytes: &[u8], spec: &FormatSpec) {
        text::write_padded(bytes, spec, self.buf);
    }
}

/// Adapter rendering any [`fmt::Display`] type through the sink.
pub struct Displayed<T: fmt::Display>(pub T);

impl<T: fmt::Display> Renderable for Displayed<T> {
    fn render(&self, sink: &mut ArgSink<'_>, spec: &FormatSpec) -> Result<(), FormatError> {
        let rendered = self.0.to_string();
        sink.write_padded(rendered.as_bytes(), spec);
        Ok(())
    }
}
