//! Declared field types and their classification into
//! [`Shape`](crate::schema::Shape)s.
//!
//! - [`TypeExpr`]: the declared-type language a record field is written in
//! - [`TypeBuilder`]: factory for `TypeExpr` values
//! - [`classify`]: total mapping from `TypeExpr` to `Shape`
//! - [`TypeExpr::parse`]: text notation used by schema documents

pub mod builder;
pub mod classify;
pub mod parse;

pub use builder::TypeBuilder;
pub use classify::classify;

use std::fmt;

use crate::schema::NumberKind;

/// A field's declared type.
///
/// Nullability comes in two independent forms: [`TypeExpr::Optional`] is an
/// optional wrapper around a value (`Option<i32>`), while
/// [`TypeExpr::Nullable`] annotates a reference-like type as nullable
/// (`string?`). Both classify to the nullable shape variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Bool,
    Number(NumberKind),
    String,
    /// Fixed-size sequence.
    Array(Box<TypeExpr>),
    /// Growable ordered sequence.
    List(Box<TypeExpr>),
    /// A record or other complex type referred to by name.
    Named(String),
    Optional(Box<TypeExpr>),
    Nullable(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Optional(_) | Self::Nullable(_))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Number(kind) => f.write_str(kind.as_str()),
            Self::String => f.write_str("string"),
            Self::Array(el) => write!(f, "[{}]", el),
            Self::List(el) => write!(f, "Vec<{}>", el),
            Self::Named(name) => f.write_str(name),
            Self::Optional(inner) => write!(f, "Option<{}>", inner),
            Self::Nullable(inner) => write!(f, "{}?", inner),
        }
    }
}
