//! Format-string parser and dispatcher.
//!
//! The state machine at the heart of the engine: it splits literal runs
//! from replacement fields, resolves argument indices, parses the
//! specifier grammar in strict left-to-right order and hands each field
//! to the matching encoder.
//!
//! Reference grammar: `{[index][:[[fill]align][sign][#][[0]width]
//! [.precision][type]]}`, with `{{`/`}}` escaping literal braces.
//!
//! Error reporting invariant: when a field-level error is detected but
//! the remainder of the template never closes the open brace, the
//! unmatched brace is reported instead.

use crate::args::{ArgSink, FormatArg};
use crate::buffer::{AppendTransaction, OutBuf};
use crate::error::FormatError;
use crate::num;
use crate::spec::{Align, FormatSpec};
use crate::text;

/// Indexing mode for one formatting call. A template commits to one
/// mode at its first field and may not switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexMode {
    Unset,
    Auto,
    Manual,
}

/// Reusable formatter owning a growable output buffer.
///
/// Repeated [`Formatter::format`] calls append to the same buffer, so
/// one formatter can assemble output from several templates before the
/// result is taken.
#[derive(Debug, Default)]
pub struct Formatter {
    buf: OutBuf,
}

impl Formatter {
    pub fn new() -> Self {
        Self { buf: OutBuf::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: OutBuf::with_capacity(capacity),
        }
    }

    /// Renders `template` with `args` into the buffer.
    ///
    /// Rendering is eager: every argument is fully consumed before this
    /// returns, so borrowed payloads are never observed after the call.
    /// On error the buffer may hold a partial prefix of the output;
    /// only the success path exposes contents.
    pub fn format(&mut self, template: &str, args: &[FormatArg<'_>]) -> Result<(), FormatError> {
        Machine {
            s: template.as_bytes(),
            pos: 0,
            args,
            next_auto: 0,
            mode: IndexMode::Unset,
            open_braces: 0,
            buf: &mut self.buf,
        }
        .run()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }

    /// Contents copied with a trailing NUL appended.
    pub fn to_bytes_with_nul(&self) -> Vec<u8> {
        self.buf.to_bytes_with_nul()
    }

    /// Appends the canonical decimal form of `value`, no field rules.
    pub fn write_int(&mut self, value: i64) {
        num::append_decimal(value, &mut self.buf);
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    pub fn write_str(&mut self, s: &str) {
        self.buf.append(s.as_bytes());
    }

    /// Appends `bytes` under `spec`'s width/alignment/fill rules.
    pub fn write_padded(&mut self, bytes: &[u8], spec: &FormatSpec) {
        text::write_padded(bytes, spec, &mut self.buf);
    }

    /// Appends a fixed-radix encoding (see [`crate::radix`]).
    pub fn write_transaction<T: AppendTransaction>(&mut self, t: &T) {
        self.buf.append_transaction(t);
    }
}

struct Machine<'a, 'b> {
    s: &'b [u8],
    pos: usize,
    args: &'b [FormatArg<'a>],
    next_auto: usize,
    mode: IndexMode,
    /// Braces opened for the current field (2 inside a nested
    /// precision field); drives the unmatched-brace override.
    open_braces: usize,
    buf: &'b mut OutBuf,
}

impl Machine<'_, '_> {
    fn run(&mut self) -> Result<(), FormatError> {
        let mut lit_start = 0;
        while self.pos < self.s.len() {
            let c = self.s[self.pos];
            if c != b'{' && c != b'}' {
                self.pos += 1;
                continue;
            }
            if self.pos + 1 < self.s.len() && self.s[self.pos + 1] == c {
                // escaped brace: emit the literal run plus one brace
                self.buf.append(&self.s[lit_start..=self.pos]);
                self.pos += 2;
                lit_start = self.pos;
                continue;
            }
            if c == b'}' {
                return Err(FormatError::UnmatchedBrace {
                    pos: self.pos,
                    brace: '}',
                });
            }
            self.buf.append(&self.s[lit_start..self.pos]);
            let field_pos = self.pos;
            self.pos += 1;
            self.open_braces = 1;
            self.field(field_pos)?;
            lit_start = self.pos;
        }
        self.buf.append(&self.s[lit_start..]);
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.s.get(self.pos).copied()
    }

    /// Applies the unmatched-brace override before surfacing `err`.
    fn error(&self, err: FormatError) -> FormatError {
        let mut open = self.open_braces as i64;
        for &byte in &self.s[self.pos..] {
            if byte == b'{' {
                open += 1;
            } else if byte == b'}' {
                open -= 1;
                if open == 0 {
                    return err;
                }
            }
        }
        FormatError::UnmatchedBrace {
            pos: self.pos,
            brace: '{',
        }
    }

    fn unmatched_open(&self) -> FormatError {
        FormatError::UnmatchedBrace {
            pos: self.pos,
            brace: '{',
        }
    }

    /// Parses a digit run as an unsigned value bounded by `i32::MAX`.
    fn parse_uint(&mut self) -> Result<usize, FormatError> {
        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(c @ b'0'..=b'9') = self.peek() {
            value = value * 10 + u64::from(c - b'0');
            if value > i32::MAX as u64 {
                return Err(self.error(FormatError::NumberTooBig { pos: start }));
            }
            self.pos += 1;
        }
        Ok(value as usize)
    }

    /// Resolves the argument index for the current field, entering or
    /// validating the indexing mode.
    fn parse_arg_index(&mut self) -> Result<usize, FormatError> {
        let start = self.pos;
        match self.peek() {
            Some(b'0'..=b'9') => {
                if self.mode == IndexMode::Auto {
                    return Err(self.error(FormatError::IndexingModeConflict { pos: start }));
                }
                self.mode = IndexMode::Manual;
                let index = self.parse_uint()?;
                if index >= self.args.len() {
                    return Err(self.error(FormatError::ArgumentIndexOutOfRange {
                        pos: start,
                        index,
                        len: self.args.len(),
                    }));
                }
                Ok(index)
            }
            Some(b':') | Some(b'}') => {
                if self.mode == IndexMode::Manual {
                    return Err(self.error(FormatError::IndexingModeConflict { pos: start }));
                }
                self.mode = IndexMode::Auto;
                let index = self.next_auto;
                self.next_auto += 1;
                if index >= self.args.len() {
                    return Err(self.error(FormatError::ArgumentIndexOutOfRange {
                        pos: start,
                        index,
                        len: self.args.len(),
                    }));
                }
                Ok(index)
            }
            _ => Err(self.error(FormatError::InvalidArgumentIndex { pos: start })),
        }
    }

    fn parse_fill_align(
        &mut self,
        spec: &mut FormatSpec,
        arg: &FormatArg<'_>,
    ) -> Result<(), FormatError> {
        fn align_of(byte: u8) -> Option<Align> {
            match byte {
                b'<' => Some(Align::Left),
                b'>' => Some(Align::Right),
                b'=' => Some(Align::Numeric),
                b'^' => Some(Align::Center),
                _ => None,
            }
        }
        let Some(first) = self.peek() else {
            return Ok(());
        };
        let start = self.pos;
        if let Some(align) = self.s.get(self.pos + 1).copied().and_then(align_of) {
            // two-char form: explicit fill, then the alignment symbol
            if first == b'}' {
                // the field closes here; the symbol belongs to literal text
                return Ok(());
            }
            if first == b'{' {
                return Err(self.error(FormatError::InvalidFillChar {
                    pos: start,
                    fill: '{',
                }));
            }
            spec.fill = first;
            spec.align = align;
            self.pos += 2;
        } else if let Some(align) = align_of(first) {
            spec.align = align;
            self.pos += 1;
        } else {
            return Ok(());
        }
        if spec.align == Align::Numeric && !arg.is_numeric() {
            return Err(self.error(FormatError::NumericAlignNotAllowedForKind {
                pos: start,
                kind: arg.kind(),
            }));
        }
        Ok(())
    }

    fn parse_sign(&mut self, spec: &mut FormatSpec, arg: &FormatArg<'_>) -> Result<(), FormatError> {
        let Some(c) = self.peek() else {
            return Ok(());
        };
        if c != b'+' && c != b'-' && c != b' ' {
            return Ok(());
        }
        let unsigned_kind = matches!(arg, FormatArg::Uint(_) | FormatArg::Ulong(_));
        if !arg.is_numeric() || unsigned_kind {
            let kind = if unsigned_kind {
                "unsigned integer"
            } else {
                arg.kind()
            };
            return Err(self.error(FormatError::SignNotAllowedForKind {
                pos: self.pos,
                sign: c as char,
                kind,
            }));
        }
        match c {
            b'+' => {
                spec.sign = true;
                spec.plus = true;
            }
            b' ' => spec.sign = true,
            _ => {}
        }
        self.pos += 1;
        Ok(())
    }

    /// Resolves a `.{index}` nested precision field to a value.
    fn parse_precision_arg(&mut self) -> Result<usize, FormatError> {
        self.pos += 1; // past '{'
        self.open_braces += 1;
        let prec_pos = self.pos;
        let index = self.parse_arg_index()?;
        let raw: u64 = match self.args[index] {
            FormatArg::Int(v) => {
                if v < 0 {
                    return Err(self.error(FormatError::NegativePrecision { pos: prec_pos }));
                }
                v as u64
            }
            FormatArg::Uint(v) => u64::from(v),
            FormatArg::Long(v) => {
                if v < 0 {
                    return Err(self.error(FormatError::NegativePrecision { pos: prec_pos }));
                }
                v as u64
            }
            FormatArg::Ulong(v) => v,
            _ => {
                return Err(self.error(FormatError::PrecisionNotInteger { pos: prec_pos }));
            }
        };
        if raw > i32::MAX as u64 {
            return Err(self.error(FormatError::NumberTooBig { pos: prec_pos }));
        }
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.open_braces -= 1;
            Ok(raw as usize)
        } else {
            Err(self.unmatched_open())
        }
    }

    /// Parses one replacement field starting just past its `{`.
    fn field(&mut self, field_pos: usize) -> Result<(), FormatError> {
        let index = self.parse_arg_index()?;
        let arg = self.args[index];
        let mut spec = FormatSpec::default();
        let mut precision: Option<usize> = None;
        let mut code_pos = field_pos;

        if self.peek() == Some(b':') {
            self.pos += 1;
            self.parse_fill_align(&mut spec, &arg)?;
            self.parse_sign(&mut spec, &arg)?;

            if self.peek() == Some(b'#') {
                if !arg.is_numeric() {
                    return Err(self.error(FormatError::AlternateFormNotAllowedForKind {
                        pos: self.pos,
                        kind: arg.kind(),
                    }));
                }
                spec.hash = true;
                self.pos += 1;
            }

            if matches!(self.peek(), Some(b'0'..=b'9')) {
                if self.peek() == Some(b'0') {
                    if !arg.is_numeric() {
                        return Err(self.error(FormatError::NumericAlignNotAllowedForKind {
                            pos: self.pos,
                            kind: arg.kind(),
                        }));
                    }
                    spec.align = Align::Numeric;
                    spec.fill = b'0';
                }
                // the zero is consumed again as part of the width run
                spec.width = self.parse_uint()?;
            }

            if self.peek() == Some(b'.') {
                let dot_pos = self.pos;
                self.pos += 1;
                match self.peek() {
                    Some(b'0'..=b'9') => precision = Some(self.parse_uint()?),
                    Some(b'{') => precision = Some(self.parse_precision_arg()?),
                    _ => {
                        return Err(self.error(FormatError::MissingPrecision { pos: dot_pos }));
                    }
                }
                if !arg.is_float() {
                    return Err(self.error(FormatError::PrecisionRequiresFloat { pos: dot_pos }));
                }
            }

            if let Some(c) = self.peek()
                && c != b'}'
            {
                code_pos = self.pos;
                spec.type_code = Some(c);
                self.pos += 1;
            }
        }

        if self.peek() == Some(b'}') {
            self.pos += 1;
        } else {
            return Err(self.unmatched_open());
        }
        self.open_braces = 0;

        match arg {
            FormatArg::Int(v) => {
                num::format_signed(i64::from(v), u64::from(v as u32), &spec, self.buf, code_pos)
            }
            FormatArg::Uint(v) => num::format_unsigned(u64::from(v), &spec, self.buf, code_pos),
            FormatArg::Long(v) => num::format_signed(v, v as u64, &spec, self.buf, code_pos),
            FormatArg::Ulong(v) => num::format_unsigned(v, &spec, self.buf, code_pos),
            FormatArg::Double(v) | FormatArg::LongDouble(v) => {
                num::format_float(v, &spec, precision, self.buf, code_pos)
            }
            FormatArg::Char(c) => text::format_char(c, &spec, self.buf, code_pos),
            FormatArg::Str(s) => text::format_str(s, &spec, self.buf, code_pos),
            FormatArg::Pointer(p) => text::format_pointer(p, &spec, self.buf, code_pos),
            FormatArg::Custom(r) => {
                if let Some(code) = spec.type_code {
                    return Err(FormatError::UnknownTypeForKind {
                        pos: code_pos,
                        code: code as char,
                        kind: "object",
                    });
                }
                let mut sink = ArgSink::new(self.buf);
                r.render(&mut sink, &spec)
            }
        }
    }
}
