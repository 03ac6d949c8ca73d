//! String, char and pointer rendering.
//!
//! Thin padding/alignment wrappers around raw byte payloads. Pointers
//! reuse the integer encoder: an address always renders as
//! alternate-form lowercase hex, whatever the requested code.

use crate::buffer::OutBuf;
use crate::error::FormatError;
use crate::num;
use crate::spec::{Align, FormatSpec};

/// Appends `content` padded and aligned per `spec`.
pub(crate) fn write_padded(content: &[u8], spec: &FormatSpec, buf: &mut OutBuf) {
    if spec.width <= content.len() {
        buf.append(content);
        return;
    }
    let region = buf.grow(spec.width);
    match spec.align {
        Align::Left => {
            region[..content.len()].copy_from_slice(content);
            for byte in &mut region[content.len()..] {
                *byte = spec.fill;
            }
        }
        Align::Center => {
            let range = num::fill_padding(region, content.len(), spec.fill);
            region[range].copy_from_slice(content);
        }
        Align::Right | Align::Default | Align::Numeric => {
            let start = region.len() - content.len();
            for byte in &mut region[..start] {
                *byte = spec.fill;
            }
            region[start..].copy_from_slice(content);
        }
    }
}

/// Renders a string payload. `None` models a null payload handed over
/// from a C boundary.
pub fn format_str(
    payload: Option<&[u8]>,
    spec: &FormatSpec,
    buf: &mut OutBuf,
    pos: usize,
) -> Result<(), FormatError> {
    if let Some(code) = spec.type_code
        && code != b's'
    {
        return Err(FormatError::UnknownTypeForKind {
            pos,
            code: code as char,
            kind: "string",
        });
    }
    let bytes = payload.ok_or(FormatError::NullStringPointer { pos })?;
    write_padded(bytes, spec, buf);
    Ok(())
}

/// Renders a single character payload.
pub fn format_char(
    value: u8,
    spec: &FormatSpec,
    buf: &mut OutBuf,
    pos: usize,
) -> Result<(), FormatError> {
    if let Some(code) = spec.type_code
        && code != b'c'
    {
        return Err(FormatError::UnknownTypeForKind {
            pos,
            code: code as char,
            kind: "char",
        });
    }
    write_padded(&[value], spec, buf);
    Ok(())
}

/// Renders a pointer as `0x`-prefixed lowercase hex of the address.
pub fn format_pointer(
    addr: usize,
    spec: &FormatSpec,
    buf: &mut OutBuf,
    pos: usize,
) -> Result<(), FormatError> {
    if let Some(code) = spec.type_code
        && code != b'p'
    {
        return Err(FormatError::UnknownTypeForKind {
            pos,
            code: code as char,
            kind: "pointer",
        });
    }
    let mut addr_spec = *spec;
    addr_spec.hash = true;
    addr_spec.type_code = Some(b'x');
    num::format_unsigned(addr as u64, &addr_spec, buf, pos)
}
