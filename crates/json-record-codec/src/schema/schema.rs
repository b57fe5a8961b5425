use std::fmt;

use indexmap::IndexMap;

use crate::error::SchemaError;

/// Numeric kinds a field can declare. Each kind fixes the accepted range and
/// the textual form written to and read from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int32,
    Int64,
    Int16,
    Byte,
    UInt32,
    UInt64,
    UInt16,
    SByte,
    Float32,
    Float64,
    Decimal,
}

impl NumberKind {
    pub const ALL: [NumberKind; 11] = [
        Self::Int32,
        Self::Int64,
        Self::Int16,
        Self::Byte,
        Self::UInt32,
        Self::UInt64,
        Self::UInt16,
        Self::SByte,
        Self::Float32,
        Self::Float64,
        Self::Decimal,
    ];

    /// Short type-expression spelling (`i32`, `u8`, `decimal`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Int16 => "i16",
            Self::Byte => "u8",
            Self::UInt32 => "u32",
            Self::UInt64 => "u64",
            Self::UInt16 => "u16",
            Self::SByte => "i8",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Decimal => "decimal",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Int16 => "Int16",
            Self::Byte => "Byte",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::UInt16 => "UInt16",
            Self::SByte => "SByte",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Decimal => "Decimal",
        }
    }

    /// Accepts both the short spelling and the kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name || kind.name() == name)
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, Self::Float32 | Self::Float64 | Self::Decimal)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Inclusive bounds of a signed integer kind.
    pub fn signed_bounds(self) -> Option<(i64, i64)> {
        match self {
            Self::SByte => Some((i8::MIN.into(), i8::MAX.into())),
            Self::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            Self::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            Self::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Upper bound of an unsigned integer kind.
    pub fn unsigned_max(self) -> Option<u64> {
        match self {
            Self::Byte => Some(u8::MAX.into()),
            Self::UInt16 => Some(u16::MAX.into()),
            Self::UInt32 => Some(u32::MAX.into()),
            Self::UInt64 => Some(u64::MAX),
            _ => None,
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar payload of a `Primitive` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Number(NumberKind),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Number(kind) => f.write_str(kind.as_str()),
        }
    }
}

/// Classified shape of a field.
///
/// Record shapes refer to other records by name; the name is resolved
/// through the [`SchemaRegistry`](super::SchemaRegistry), which lets record
/// types reference each other in cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Primitive(Primitive),
    PrimitiveNullable(Primitive),
    Str,
    StrNullable,
    Record(String),
    RecordNullable(String),
    Array(Box<Shape>),
    ArrayNullable(Box<Shape>),
    List(Box<Shape>),
    ListNullable(Box<Shape>),
    /// A type with no registered record schema, handled by the ambient codec.
    Ambient(String),
    AmbientNullable(String),
}

impl Shape {
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Self::PrimitiveNullable(_)
                | Self::StrNullable
                | Self::RecordNullable(_)
                | Self::ArrayNullable(_)
                | Self::ListNullable(_)
                | Self::AmbientNullable(_)
        )
    }

    /// Whether an instance may hold null for this shape.
    ///
    /// Reference-like shapes accept null even when not declared nullable;
    /// only primitives require a value.
    pub fn accepts_null(&self) -> bool {
        !matches!(self, Self::Primitive(_))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{}", p),
            Self::PrimitiveNullable(p) => write!(f, "{}?", p),
            Self::Str => f.write_str("string"),
            Self::StrNullable => f.write_str("string?"),
            Self::Record(name) | Self::Ambient(name) => f.write_str(name),
            Self::RecordNullable(name) | Self::AmbientNullable(name) => write!(f, "{}?", name),
            Self::Array(el) => write!(f, "[{}]", el),
            Self::ArrayNullable(el) => write!(f, "[{}]?", el),
            Self::List(el) => write!(f, "Vec<{}>", el),
            Self::ListNullable(el) => write!(f, "Vec<{}>?", el),
        }
    }
}

/// One declared field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Exact on-wire key.
    pub name: String,
    pub shape: Shape,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// Ordered field layout of one record type.
///
/// Field order is declaration order and is also the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    name: String,
    fields: IndexMap<String, FieldSchema>,
}

impl RecordSchema {
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSchema>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut map = IndexMap::new();
        for field in fields {
            if map.contains_key(&field.name) {
                return Err(SchemaError::DuplicateField {
                    record: name,
                    field: field.name,
                });
            }
            map.insert(field.name.clone(), field);
        }
        Ok(Self { name, fields: map })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &FieldSchema> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Position and schema of a field.
    pub fn entry(&self, name: &str) -> Option<(usize, &FieldSchema)> {
        self.fields
            .get_full(name)
            .map(|(index, _, field)| (index, field))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    pub fn field_at(&self, index: usize) -> Option<&FieldSchema> {
        self.fields.get_index(index).map(|(_, field)| field)
    }
}
