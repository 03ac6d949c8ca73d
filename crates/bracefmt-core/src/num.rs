//! Numeric encoders.
//!
//! Integer rendering emits two decimal digits per division step from a
//! digit-pair lookup table; hex and octal walk the value's bit pattern
//! directly. Floating-point rendering delegates digit generation to
//! `core::fmt` (which is locale-free), then sign, fill and alignment
//! are re-applied by direct buffer manipulation, since `core::fmt`
//! supports neither center alignment with arbitrary fill bytes nor a
//! separate sign slot.
//!
//! Padding layout invariant: numeric alignment places the sign and any
//! base prefix first, the fill next, and the digits last.

use core::ops::Range;

use crate::buffer::OutBuf;
use crate::error::FormatError;
use crate::radix::{HEX_LOWER, HEX_UPPER};
use crate::spec::{Align, FormatSpec};

/// Pairs of decimal digits for 00..=99.
const DIGIT_PAIRS: &[u8; 200] = b"0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

/// Counts decimal digits, four at a time to limit divisions.
pub(crate) fn count_digits(mut n: u64) -> usize {
    let mut count = 1;
    loop {
        if n < 10 {
            return count;
        }
        if n < 100 {
            return count + 1;
        }
        if n < 1000 {
            return count + 2;
        }
        if n < 10000 {
            return count + 3;
        }
        n /= 10000;
        count += 4;
    }
}

/// Writes exactly `num_digits` decimal digits of `value` into
/// `out[..num_digits]`, two digits per division step.
pub(crate) fn format_decimal(out: &mut [u8], mut value: u64, num_digits: usize) {
    let mut pos = num_digits;
    while value >= 100 {
        let index = ((value % 100) * 2) as usize;
        value /= 100;
        out[pos - 1] = DIGIT_PAIRS[index + 1];
        out[pos - 2] = DIGIT_PAIRS[index];
        pos -= 2;
    }
    if value < 10 {
        out[pos - 1] = b'0' + value as u8;
        return;
    }
    let index = (value * 2) as usize;
    out[pos - 1] = DIGIT_PAIRS[index + 1];
    out[pos - 2] = DIGIT_PAIRS[index];
}

/// Fills the padding around centered content and returns the content
/// range. The surplus fill byte for odd padding goes on the right.
pub(crate) fn fill_padding(region: &mut [u8], content_len: usize, fill: u8) -> Range<usize> {
    let padding = region.len() - content_len;
    let left = padding / 2;
    for byte in &mut region[..left] {
        *byte = fill;
    }
    for byte in &mut region[left + content_len..] {
        *byte = fill;
    }
    left..left + content_len
}

/// Reserves buffer space for a field of `content_len` bytes, `head`
/// (sign and any base prefix) included, writes the head and the fill,
/// and returns the grown region together with the position one past
/// the last content byte. Digit generators write backward from that
/// position.
fn prepare_filled<'b>(
    buf: &'b mut OutBuf,
    content_len: usize,
    head: &[u8],
    spec: &FormatSpec,
) -> (&'b mut [u8], usize) {
    let width = spec.width.max(content_len);
    let region = buf.grow(width);
    if width == content_len {
        region[..head.len()].copy_from_slice(head);
        return (region, content_len);
    }
    match spec.align {
        Align::Left => {
            region[..head.len()].copy_from_slice(head);
            for byte in &mut region[content_len..] {
                *byte = spec.fill;
            }
            (region, content_len)
        }
        Align::Center => {
            let content = fill_padding(region, content_len, spec.fill);
            let end = content.end;
            region[content.start..content.start + head.len()].copy_from_slice(head);
            (region, end)
        }
        Align::Numeric => {
            region[..head.len()].copy_from_slice(head);
            let digits = content_len - head.len();
            for byte in &mut region[head.len()..width - digits] {
                *byte = spec.fill;
            }
            (region, width)
        }
        Align::Right | Align::Default => {
            let start = width - content_len;
            for byte in &mut region[..start] {
                *byte = spec.fill;
            }
            region[start..start + head.len()].copy_from_slice(head);
            (region, width)
        }
    }
}

fn decimal_field(magnitude: u64, sign: Option<u8>, spec: &FormatSpec, buf: &mut OutBuf) {
    let num_digits = count_digits(magnitude);
    let mut head = [0u8; 1];
    let head_len = match sign {
        Some(s) => {
            head[0] = s;
            1
        }
        None => 0,
    };
    let content_len = head_len + num_digits;
    let (region, end) = prepare_filled(buf, content_len, &head[..head_len], spec);
    format_decimal(&mut region[end - num_digits..end], magnitude, num_digits);
}

fn shifted_field(
    bits: u64,
    shift: u32,
    alphabet: &[u8; 16],
    prefix: &[u8],
    sign: Option<u8>,
    spec: &FormatSpec,
    buf: &mut OutBuf,
) {
    let mut num_digits = 1;
    let mut n = bits;
    while n >> shift != 0 {
        n >>= shift;
        num_digits += 1;
    }
    let mut head = [0u8; 3];
    let mut head_len = 0;
    if let Some(s) = sign {
        head[0] = s;
        head_len = 1;
    }
    head[head_len..head_len + prefix.len()].copy_from_slice(prefix);
    head_len += prefix.len();
    let content_len = head_len + num_digits;
    let (region, end) = prepare_filled(buf, content_len, &head[..head_len], spec);
    let mask = (1u64 << shift) - 1;
    let mut n = bits;
    let mut pos = end;
    for _ in 0..num_digits {
        pos -= 1;
        region[pos] = alphabet[(n & mask) as usize];
        n >>= shift;
    }
}

/// Renders a signed integer.
///
/// Decimal shows sign and magnitude (the magnitude is taken through an
/// unsigned reinterpretation so `i64::MIN` cannot overflow); `x`/`X`/`o`
/// render `bits`, the two's-complement pattern at the argument's true
/// width, with no minus-sign slot.
pub fn format_signed(
    value: i64,
    bits: u64,
    spec: &FormatSpec,
    buf: &mut OutBuf,
    pos: usize,
) -> Result<(), FormatError> {
    match spec.type_code {
        None | Some(b'd') => {
            let (sign, magnitude) = if value < 0 {
                (Some(b'-'), value.unsigned_abs())
            } else {
                (spec.positive_sign(), value as u64)
            };
            decimal_field(magnitude, sign, spec, buf);
            Ok(())
        }
        Some(code @ (b'x' | b'X')) => {
            let sign = if value < 0 { None } else { spec.positive_sign() };
            let (alphabet, prefix): (_, &[u8]) = if code == b'X' {
                (&HEX_UPPER, if spec.hash { b"0X" } else { b"" })
            } else {
                (&HEX_LOWER, if spec.hash { b"0x" } else { b"" })
            };
            shifted_field(bits, 4, alphabet, prefix, sign, spec, buf);
            Ok(())
        }
        Some(b'o') => {
            let sign = if value < 0 { None } else { spec.positive_sign() };
            let prefix: &[u8] = if spec.hash { b"0" } else { b"" };
            shifted_field(bits, 3, &HEX_LOWER, prefix, sign, spec, buf);
            Ok(())
        }
        Some(code) => Err(FormatError::UnknownTypeForKind {
            pos,
            code: code as char,
            kind: "integer",
        }),
    }
}

/// Renders an unsigned integer.
pub fn format_unsigned(
    value: u64,
    spec: &FormatSpec,
    buf: &mut OutBuf,
    pos: usize,
) -> Result<(), FormatError> {
    match spec.type_code {
        None | Some(b'd') => {
            decimal_field(value, spec.positive_sign(), spec, buf);
            Ok(())
        }
        Some(code @ (b'x' | b'X')) => {
            let (alphabet, prefix): (_, &[u8]) = if code == b'X' {
                (&HEX_UPPER, if spec.hash { b"0X" } else { b"" })
            } else {
                (&HEX_LOWER, if spec.hash { b"0x" } else { b"" })
            };
            shifted_field(value, 4, alphabet, prefix, spec.positive_sign(), spec, buf);
            Ok(())
        }
        Some(b'o') => {
            let prefix: &[u8] = if spec.hash { b"0" } else { b"" };
            shifted_field(value, 3, &HEX_LOWER, prefix, spec.positive_sign(), spec, buf);
            Ok(())
        }
        Some(code) => Err(FormatError::UnknownTypeForKind {
            pos,
            code: code as char,
            kind: "integer",
        }),
    }
}

/// Canonical decimal append with no field rules (unformatted fast path).
pub fn append_decimal(value: i64, buf: &mut OutBuf) {
    let (negative, magnitude) = if value < 0 {
        (true, value.unsigned_abs())
    } else {
        (false, value as u64)
    };
    let num_digits = count_digits(magnitude);
    let start = usize::from(negative);
    let region = buf.grow(start + num_digits);
    if negative {
        region[0] = b'-';
    }
    format_decimal(&mut region[start..], magnitude, num_digits);
}

/// Renders a floating-point value.
///
/// The sign comes from the sign bit, not an ordered comparison, so NaN
/// and negative zero keep their sign. NaN and infinity render as fixed
/// literals regardless of precision or code.
pub fn format_float(
    value: f64,
    spec: &FormatSpec,
    precision: Option<usize>,
    buf: &mut OutBuf,
    pos: usize,
) -> Result<(), FormatError> {
    let (code, upper) = match spec.type_code {
        None | Some(b'g') => (b'g', false),
        Some(b'G') => (b'g', true),
        Some(b'e') => (b'e', false),
        Some(b'E') => (b'e', true),
        Some(b'f') => (b'f', false),
        Some(b'F') => (b'f', true),
        Some(c) => {
            return Err(FormatError::UnknownTypeForKind {
                pos,
                code: c as char,
                kind: "double",
            });
        }
    };
    let sign = if value.is_sign_negative() {
        Some(b'-')
    } else {
        spec.positive_sign()
    };
    let magnitude = value.abs();

    let body = if magnitude.is_nan() {
        String::from(if upper { "NAN" } else { "nan" })
    } else if magnitude.is_infinite() {
        String::from(if upper { "INF" } else { "inf" })
    } else {
        match code {
            b'f' => fixed_digits(magnitude, precision.unwrap_or(6), spec.hash),
            b'e' => scientific_digits(magnitude, precision.unwrap_or(6), upper, spec.hash),
            _ => match precision {
                // Unspecified precision: shortest form that round-trips.
                None => format!("{magnitude}"),
                Some(p) => general_digits(magnitude, p.max(1), upper, spec.hash),
            },
        }
    };

    let mut head = [0u8; 1];
    let head_len = match sign {
        Some(s) => {
            head[0] = s;
            1
        }
        None => 0,
    };
    let content_len = head_len + body.len();
    let (region, end) = prepare_filled(buf, content_len, &head[..head_len], spec);
    region[end - body.len()..end].copy_from_slice(body.as_bytes());
    Ok(())
}

/// `f`/`F`: fixed-point decimal.
fn fixed_digits(value: f64, precision: usize, alt: bool) -> String {
    let mut s = format!("{value:.precision$}");
    if precision == 0 && alt {
        s.push('.');
    }
    s
}

/// `e`/`E`: scientific notation with a two-digit minimum exponent.
fn scientific_digits(value: f64, precision: usize, upper: bool, alt: bool) -> String {
    let e_char = if upper { 'E' } else { 'e' };
    if value == 0.0 {
        let mut mantissa = format!("{:.precision$}", 0.0);
        if precision == 0 && alt {
            mantissa.push('.');
        }
        return format!("{mantissa}{e_char}+00");
    }
    let mut exp = value.log10().floor() as i32;
    let mut mantissa = value / 10f64.powi(exp);
    // log10 can land one off near powers of ten
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exp += 1;
    } else if mantissa < 1.0 {
        mantissa *= 10.0;
        exp -= 1;
    }
    let mut digits = format!("{mantissa:.precision$}");
    // rounding may carry into a second integer digit (9.99... -> 10.0)
    if digits.starts_with("10") {
        exp += 1;
        digits = format!("{:.precision$}", 1.0);
    }
    if precision == 0 && alt {
        digits.push('.');
    }
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{digits}{e_char}{exp_sign}{:02}", exp.unsigned_abs())
}

/// `g`/`G`: fixed when the exponent fits within the significant digits,
/// scientific otherwise. Rounds half-to-even (inherited from
/// `core::fmt`) and strips trailing zeros unless the alternate form is
/// requested. Dispatch uses the unrounded exponent.
fn general_digits(value: f64, precision: usize, upper: bool, alt: bool) -> String {
    if value == 0.0 {
        return if alt && precision > 1 {
            format!("0.{}", "0".repeat(precision - 1))
        } else if alt {
            String::from("0.")
        } else {
            String::from("0")
        };
    }
    let mut exp = value.log10().floor() as i32;
    let scaled = value / 10f64.powi(exp);
    if scaled >= 10.0 {
        exp += 1;
    } else if scaled < 1.0 {
        exp -= 1;
    }
    if exp >= -4 && exp < precision as i32 {
        let frac = (precision as i32 - 1 - exp).max(0) as usize;
        let mut s = format!("{value:.frac$}");
        if !alt {
            strip_trailing_zeros(&mut s);
        }
        s
    } else {
        let mut s = scientific_digits(value, precision - 1, upper, alt);
        if !alt
            && let Some(e_pos) = s.bytes().position(|b| b == b'e' || b == b'E')
        {
            let mut mantissa = s[..e_pos].to_string();
            strip_trailing_zeros(&mut mantissa);
            s = format!("{mantissa}{}", &s[e_pos..]);
        }
        s
    }
}

/// Removes trailing zeros after a decimal point, and the point itself
/// if nothing follows it.
fn strip_trailing_zeros(s: &mut String) {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
}
