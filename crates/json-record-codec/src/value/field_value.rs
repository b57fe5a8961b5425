use super::{Decimal, RecordRef};
use crate::error::CodecError;
use crate::schema::{NumberKind, Primitive, Shape};

/// Value held by one field of a record.
///
/// Integers are stored canonically: signed kinds as [`FieldValue::Int`],
/// unsigned kinds as [`FieldValue::UInt`]. [`RecordRef::set`] converts
/// incoming values to that form and range-checks them against the field's
/// kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Str(String),
    Record(RecordRef),
    Seq(Vec<FieldValue>),
    /// Payload of an ambient field.
    Json(serde_json::Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short description used in type mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float32(_) => "f32",
            Self::Float64(_) => "f64",
            Self::Decimal(_) => "decimal",
            Self::Str(_) => "string",
            Self::Record(_) => "record",
            Self::Seq(_) => "sequence",
            Self::Json(_) => "json",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(n) => Some(*n),
            Self::Int(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(x) => Some(*x),
            Self::Float32(x) => Some(f64::from(*x)),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordRef> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Value a field of `shape` starts with, and keeps when decoding finds
    /// no key for it.
    pub fn default_for(shape: &Shape) -> Self {
        match shape {
            Shape::Primitive(Primitive::Bool) => Self::Bool(false),
            Shape::Primitive(Primitive::Number(kind)) => zero(*kind),
            Shape::Str => Self::Str(String::new()),
            Shape::Array(_) | Shape::List(_) => Self::Seq(Vec::new()),
            Shape::PrimitiveNullable(_)
            | Shape::StrNullable
            | Shape::Record(_)
            | Shape::RecordNullable(_)
            | Shape::ArrayNullable(_)
            | Shape::ListNullable(_)
            | Shape::Ambient(_)
            | Shape::AmbientNullable(_) => Self::Null,
        }
    }
}

fn zero(kind: NumberKind) -> FieldValue {
    match kind {
        NumberKind::Float32 => FieldValue::Float32(0.0),
        NumberKind::Float64 => FieldValue::Float64(0.0),
        NumberKind::Decimal => FieldValue::Decimal(Decimal::ZERO),
        kind if kind.is_unsigned() => FieldValue::UInt(0),
        _ => FieldValue::Int(0),
    }
}

/// Convert `value` to the canonical form for `shape`.
pub(crate) fn coerce(value: FieldValue, shape: &Shape) -> Result<FieldValue, CodecError> {
    let value = match value {
        FieldValue::Json(serde_json::Value::Null) => FieldValue::Null,
        value => value,
    };
    if value.is_null() {
        return match shape {
            Shape::Primitive(_) => Err(CodecError::mismatch(shape, "null")),
            // Non-nullable collections hold an empty sequence, never null.
            Shape::Array(_) | Shape::List(_) => Ok(FieldValue::Seq(Vec::new())),
            _ => Ok(FieldValue::Null),
        };
    }

    match (shape, value) {
        (Shape::Primitive(Primitive::Bool) | Shape::PrimitiveNullable(Primitive::Bool), v) => {
            match v {
                FieldValue::Bool(_) => Ok(v),
                v => Err(CodecError::mismatch(shape, v.type_name())),
            }
        }
        (
            Shape::Primitive(Primitive::Number(kind))
            | Shape::PrimitiveNullable(Primitive::Number(kind)),
            v,
        ) => coerce_number(*kind, v),
        (Shape::Str | Shape::StrNullable, v @ FieldValue::Str(_)) => Ok(v),
        (Shape::Record(name) | Shape::RecordNullable(name), FieldValue::Record(record)) => {
            if record.name() == name {
                Ok(FieldValue::Record(record))
            } else {
                Err(CodecError::mismatch(name, record.name()))
            }
        }
        (
            Shape::Array(element)
            | Shape::ArrayNullable(element)
            | Shape::List(element)
            | Shape::ListNullable(element),
            FieldValue::Seq(items),
        ) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| coerce(item, element).map_err(|e| e.within_index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::Seq),
        (Shape::Ambient(_) | Shape::AmbientNullable(_), v @ FieldValue::Json(_)) => Ok(v),
        (shape, v) => Err(CodecError::mismatch(shape, v.type_name())),
    }
}

/// Convert a numeric value to the canonical form of `kind`, checking range.
pub(crate) fn coerce_number(kind: NumberKind, value: FieldValue) -> Result<FieldValue, CodecError> {
    match (kind, value) {
        (kind, FieldValue::Int(n)) if kind.is_integer() => fit_integer(kind, n.into()),
        (kind, FieldValue::UInt(n)) if kind.is_integer() => fit_integer(kind, n.into()),
        (NumberKind::Float32, v @ FieldValue::Float32(_)) => Ok(v),
        (NumberKind::Float32, FieldValue::Int(n)) => Ok(FieldValue::Float32(n as f32)),
        (NumberKind::Float32, FieldValue::UInt(n)) => Ok(FieldValue::Float32(n as f32)),
        (NumberKind::Float64, v @ FieldValue::Float64(_)) => Ok(v),
        (NumberKind::Float64, FieldValue::Float32(x)) => Ok(FieldValue::Float64(x.into())),
        (NumberKind::Float64, FieldValue::Int(n)) => Ok(FieldValue::Float64(n as f64)),
        (NumberKind::Float64, FieldValue::UInt(n)) => Ok(FieldValue::Float64(n as f64)),
        (NumberKind::Decimal, v @ FieldValue::Decimal(_)) => Ok(v),
        (NumberKind::Decimal, FieldValue::Int(n)) => Ok(FieldValue::Decimal(n.into())),
        (NumberKind::Decimal, FieldValue::UInt(n)) => Ok(FieldValue::Decimal(n.into())),
        (kind, v) => Err(CodecError::mismatch(kind, v.type_name())),
    }
}

fn fit_integer(kind: NumberKind, n: i128) -> Result<FieldValue, CodecError> {
    if let Some((min, max)) = kind.signed_bounds() {
        if (i128::from(min)..=i128::from(max)).contains(&n) {
            return Ok(FieldValue::Int(n as i64));
        }
    } else if let Some(max) = kind.unsigned_max() {
        if (0..=i128::from(max)).contains(&n) {
            return Ok(FieldValue::UInt(n as u64));
        }
    }
    Err(CodecError::mismatch(kind, format!("{} (out of range)", n)))
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                Self::Int(value.into())
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                Self::UInt(value.into())
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<RecordRef> for FieldValue {
    fn from(value: RecordRef) -> Self {
        Self::Record(value)
    }
}

impl From<&RecordRef> for FieldValue {
    fn from(value: &RecordRef) -> Self {
        Self::Record(value.clone())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
