//! # bracefmt-core
//!
//! Runtime string-formatting engine for `{index:spec}` templates.
//!
//! Given a template of literal text and positional replacement fields
//! and an ordered list of typed arguments, the engine renders formatted
//! text into a growable byte buffer in one eager pass. Formatting is
//! type-directed and locale-independent; allocation is amortized by the
//! buffer's growth policy.
//!
//! ```
//! use bracefmt_core::{args, render};
//!
//! let out = render("{0}, {1}!", &args!["Hello", "World"]).unwrap();
//! assert_eq!(out, b"Hello, World!");
//!
//! let out = render("{:+.2f}", &args![3.14159]).unwrap();
//! assert_eq!(out, b"+3.14");
//! ```

#![deny(unsafe_code)]

pub mod args;
pub mod buffer;
pub mod error;
pub mod num;
pub mod parser;
pub mod radix;
pub mod spec;
pub mod text;

pub use args::{ArgSink, Displayed, FormatArg, Renderable};
pub use buffer::{AppendTransaction, OutBuf};
pub use error::FormatError;
pub use parser::Formatter;
pub use spec::{Align, FormatSpec};

/// Renders `template` with `args` into a fresh byte vector.
pub fn render(template: &str, args: &[FormatArg<'_>]) -> Result<Vec<u8>, FormatError> {
    let mut formatter = Formatter::new();
    formatter.format(template, args)?;
    Ok(formatter.into_bytes())
}

/// Renders `template` with `args` and writes the result to standard
/// output. Write errors are not reported.
pub fn print(template: &str, args: &[FormatArg<'_>]) -> Result<(), FormatError> {
    use std::io::Write;

    let mut formatter = Formatter::new();
    formatter.format(template, args)?;
    let _ = std::io::stdout().write_all(formatter.as_bytes());
    Ok(())
}

/// Builds a `[FormatArg; N]` array from heterogeneous values.
///
/// ```
/// use bracefmt_core::{args, render};
///
/// let out = render("{} {} {}", &args![1, "two", 3.0]).unwrap();
/// assert_eq!(out, b"1 two 3");
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),+ $(,)?) => {
        [$($crate::FormatArg::from($value)),+]
    };
}
