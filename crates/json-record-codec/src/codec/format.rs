//! Output style, string escaping and per-kind number text.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::CodecError;
use crate::schema::NumberKind;
use crate::value::field_value::coerce_number;
use crate::value::{Decimal, FieldValue};

/// Whitespace layout of encoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// No whitespace outside strings.
    #[default]
    Compact,
    /// Two spaces per level, one member per line.
    Indented,
}

pub(crate) const INDENT: &str = "  ";

/// Which characters of a string are written as escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EscapePolicy {
    /// `"`, `\` and control characters only.
    #[default]
    Minimal,
    /// Minimal plus every non-ASCII character as `\uXXXX`.
    Ascii,
    /// Ascii plus `<`, `>`, `&`, `'`, `+` and `` ` ``.
    HtmlSafe,
}

/// Quoted, escaped form of `s`.
pub(crate) fn quote(s: &str, policy: EscapePolicy) -> Result<String, CodecError> {
    let minimal = serde_json::to_string(s).map_err(|e| CodecError::unsupported(e.to_string()))?;
    if policy == EscapePolicy::Minimal || s.bytes().all(|b| !needs_escape(b, policy)) {
        return Ok(minimal);
    }
    let mut out = String::with_capacity(minimal.len() + 16);
    let mut units = [0u16; 2];
    for c in minimal.chars() {
        let extra = !c.is_ascii() || (policy == EscapePolicy::HtmlSafe && is_html_sensitive(c));
        if extra {
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

fn needs_escape(b: u8, policy: EscapePolicy) -> bool {
    !b.is_ascii() || (policy == EscapePolicy::HtmlSafe && is_html_sensitive(b as char))
}

fn is_html_sensitive(c: char) -> bool {
    matches!(c, '<' | '>' | '&' | '\'' | '+' | '`')
}

/// JSON text of a numeric field value of `kind`.
pub(crate) fn number_text(kind: NumberKind, value: &FieldValue) -> Result<String, CodecError> {
    match coerce_number(kind, value.clone())? {
        FieldValue::Int(n) => Ok(n.to_string()),
        FieldValue::UInt(n) => Ok(n.to_string()),
        FieldValue::Float32(x) if x.is_finite() => float_text(&x),
        FieldValue::Float64(x) if x.is_finite() => float_text(&x),
        FieldValue::Float32(x) => Err(non_finite(kind, f64::from(x))),
        FieldValue::Float64(x) => Err(non_finite(kind, x)),
        FieldValue::Decimal(d) => Ok(d.to_string()),
        other => Err(CodecError::mismatch(kind, other.type_name())),
    }
}

fn float_text<T: serde::Serialize>(x: &T) -> Result<String, CodecError> {
    serde_json::to_string(x).map_err(|e| CodecError::unsupported(e.to_string()))
}

fn non_finite(kind: NumberKind, x: f64) -> CodecError {
    CodecError::unsupported(format!("{} value {} has no JSON representation", kind, x))
}

/// Parse the exact text of a JSON number as `kind`.
pub(crate) fn parse_number(kind: NumberKind, text: &str) -> Result<FieldValue, CodecError> {
    Ok(match kind {
        NumberKind::SByte => FieldValue::Int(parse::<i8>(kind, text)?.into()),
        NumberKind::Int16 => FieldValue::Int(parse::<i16>(kind, text)?.into()),
        NumberKind::Int32 => FieldValue::Int(parse::<i32>(kind, text)?.into()),
        NumberKind::Int64 => FieldValue::Int(parse::<i64>(kind, text)?),
        NumberKind::Byte => FieldValue::UInt(parse::<u8>(kind, text)?.into()),
        NumberKind::UInt16 => FieldValue::UInt(parse::<u16>(kind, text)?.into()),
        NumberKind::UInt32 => FieldValue::UInt(parse::<u32>(kind, text)?.into()),
        NumberKind::UInt64 => FieldValue::UInt(parse::<u64>(kind, text)?),
        NumberKind::Float32 => {
            let x = parse::<f32>(kind, text)?;
            if !x.is_finite() {
                return Err(invalid_number(kind, text));
            }
            FieldValue::Float32(x)
        }
        NumberKind::Float64 => {
            let x = parse::<f64>(kind, text)?;
            if !x.is_finite() {
                return Err(invalid_number(kind, text));
            }
            FieldValue::Float64(x)
        }
        NumberKind::Decimal => FieldValue::Decimal(parse::<Decimal>(kind, text)?),
    })
}

fn parse<T: FromStr>(kind: NumberKind, text: &str) -> Result<T, CodecError> {
    text.parse().map_err(|_| invalid_number(kind, text))
}

fn invalid_number(kind: NumberKind, text: &str) -> CodecError {
    CodecError::malformed(format!("`{}` is not a valid {}", text, kind))
}
