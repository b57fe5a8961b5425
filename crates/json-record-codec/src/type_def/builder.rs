//! TypeBuilder: factory for constructing [`TypeExpr`] values.

use super::TypeExpr;
use crate::schema::NumberKind;

/// Factory for declared field types.
///
/// ```
/// use json_record_codec::{TypeBuilder, TypeExpr};
///
/// let t = TypeBuilder::new();
/// let tags = t.optional(t.list(t.str()));
/// assert_eq!(tags.to_string(), "Option<Vec<string>>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBuilder;

impl TypeBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn bool(&self) -> TypeExpr {
        TypeExpr::Bool
    }

    pub fn str(&self) -> TypeExpr {
        TypeExpr::String
    }

    pub fn num(&self, kind: NumberKind) -> TypeExpr {
        TypeExpr::Number(kind)
    }

    pub fn int32(&self) -> TypeExpr {
        self.num(NumberKind::Int32)
    }

    pub fn int64(&self) -> TypeExpr {
        self.num(NumberKind::Int64)
    }

    pub fn int16(&self) -> TypeExpr {
        self.num(NumberKind::Int16)
    }

    pub fn byte(&self) -> TypeExpr {
        self.num(NumberKind::Byte)
    }

    pub fn sbyte(&self) -> TypeExpr {
        self.num(NumberKind::SByte)
    }

    pub fn uint16(&self) -> TypeExpr {
        self.num(NumberKind::UInt16)
    }

    pub fn uint32(&self) -> TypeExpr {
        self.num(NumberKind::UInt32)
    }

    pub fn uint64(&self) -> TypeExpr {
        self.num(NumberKind::UInt64)
    }

    pub fn float32(&self) -> TypeExpr {
        self.num(NumberKind::Float32)
    }

    pub fn float64(&self) -> TypeExpr {
        self.num(NumberKind::Float64)
    }

    pub fn decimal(&self) -> TypeExpr {
        self.num(NumberKind::Decimal)
    }

    pub fn array(&self, element: TypeExpr) -> TypeExpr {
        TypeExpr::Array(Box::new(element))
    }

    pub fn list(&self, element: TypeExpr) -> TypeExpr {
        TypeExpr::List(Box::new(element))
    }

    pub fn named(&self, name: impl Into<String>) -> TypeExpr {
        TypeExpr::Named(name.into())
    }

    /// Optional wrapper, the value-kind form of nullability.
    pub fn optional(&self, inner: TypeExpr) -> TypeExpr {
        TypeExpr::Optional(Box::new(inner))
    }

    /// Nullable annotation, the reference-kind form of nullability.
    pub fn nullable(&self, inner: TypeExpr) -> TypeExpr {
        TypeExpr::Nullable(Box::new(inner))
    }
}
