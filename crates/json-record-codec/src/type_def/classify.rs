//! Shape classification.
//!
//! Classification is total: every [`TypeExpr`] produces exactly one
//! [`Shape`]. Named types without a registered record schema fall back to
//! the ambient shapes.

use super::TypeExpr;
use crate::schema::{Primitive, Shape};

/// Classify a declared type.
///
/// `is_record` reports whether a name has a registered record schema.
/// One level of nullability is unwrapped; nested wrappers
/// (`Option<Option<i32>>`, `Option<string?>`) collapse into that level.
pub fn classify<F>(expr: &TypeExpr, is_record: &F) -> Shape
where
    F: Fn(&str) -> bool + ?Sized,
{
    classify_with(expr, false, is_record)
}

fn classify_with<F>(expr: &TypeExpr, nullable: bool, is_record: &F) -> Shape
where
    F: Fn(&str) -> bool + ?Sized,
{
    match expr {
        TypeExpr::Optional(inner) | TypeExpr::Nullable(inner) => {
            classify_with(inner, true, is_record)
        }
        TypeExpr::Bool => primitive(Primitive::Bool, nullable),
        TypeExpr::Number(kind) => primitive(Primitive::Number(*kind), nullable),
        // Strings are iterable but never collections.
        TypeExpr::String if nullable => Shape::StrNullable,
        TypeExpr::String => Shape::Str,
        TypeExpr::Array(element) => {
            let element = Box::new(classify(element, is_record));
            if nullable {
                Shape::ArrayNullable(element)
            } else {
                Shape::Array(element)
            }
        }
        TypeExpr::List(element) => {
            let element = Box::new(classify(element, is_record));
            if nullable {
                Shape::ListNullable(element)
            } else {
                Shape::List(element)
            }
        }
        TypeExpr::Named(name) => match (is_record(name), nullable) {
            (true, false) => Shape::Record(name.clone()),
            (true, true) => Shape::RecordNullable(name.clone()),
            (false, false) => Shape::Ambient(name.clone()),
            (false, true) => Shape::AmbientNullable(name.clone()),
        },
    }
}

fn primitive(p: Primitive, nullable: bool) -> Shape {
    if nullable {
        Shape::PrimitiveNullable(p)
    } else {
        Shape::Primitive(p)
    }
}
