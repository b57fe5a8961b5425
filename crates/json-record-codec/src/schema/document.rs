//! Serde-loadable schema configuration.
//!
//! ```json
//! {
//!   "records": [
//!     {
//!       "name": "User",
//!       "fields": [
//!         { "name": "Id", "type": "i32" },
//!         { "name": "Email", "type": "string", "nullable": true },
//!         { "name": "Tags", "type": "Vec<string>" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::registry::RecordDecl;
use crate::error::SchemaError;
use crate::type_def::TypeExpr;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub records: Vec<RecordDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    pub name: String,
    /// Type in [`TypeExpr::parse`] notation.
    #[serde(rename = "type")]
    pub type_: String,
    /// Shorthand for a trailing `?` on `type_`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl SchemaDocument {
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse every field type into record declarations.
    pub fn to_decls(&self) -> Result<Vec<RecordDecl>, SchemaError> {
        self.records.iter().map(RecordDocument::to_decl).collect()
    }
}

impl RecordDocument {
    pub fn to_decl(&self) -> Result<RecordDecl, SchemaError> {
        let mut decl = RecordDecl::new(self.name.clone());
        for field in &self.fields {
            decl = decl.field(field.name.clone(), field.type_expr()?);
        }
        Ok(decl)
    }
}

impl FieldDocument {
    pub fn type_expr(&self) -> Result<TypeExpr, SchemaError> {
        let expr = TypeExpr::parse(&self.type_)?;
        if self.nullable && !expr.is_nullable() {
            Ok(TypeExpr::Nullable(Box::new(expr)))
        } else {
            Ok(expr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberKind, Primitive, SchemaRegistry, Shape};

    const DOC: &str = r#"{
        "records": [
            {
                "name": "User",
                "fields": [
                    { "name": "Id", "type": "i32" },
                    { "name": "Email", "type": "string", "nullable": true },
                    { "name": "Age", "type": "Option<u8>" },
                    { "name": "Friends", "type": "Vec<User>" },
                    { "name": "Home", "type": "Address?" }
                ]
            },
            {
                "name": "Address",
                "fields": [{ "name": "City", "type": "string" }]
            }
        ]
    }"#;

    #[test]
    fn loads_into_a_registry() {
        let registry = SchemaRegistry::from_json_document(DOC).unwrap();
        let user = registry.get("User").unwrap();
        let shapes: Vec<&Shape> = user.fields().map(|f| &f.shape).collect();
        assert_eq!(
            shapes,
            [
                &Shape::Primitive(Primitive::Number(NumberKind::Int32)),
                &Shape::StrNullable,
                &Shape::PrimitiveNullable(Primitive::Number(NumberKind::Byte)),
                &Shape::List(Box::new(Shape::Record("User".into()))),
                &Shape::RecordNullable("Address".into()),
            ]
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = r#"{"records":[{"name":"A","fields":[],"extra":1}]}"#;
        assert!(matches!(
            SchemaDocument::from_json(text),
            Err(SchemaError::Document(_))
        ));
    }

    #[test]
    fn bad_type_strings_surface_as_syntax_errors() {
        let text = r#"{"records":[{"name":"A","fields":[{"name":"x","type":"Vec<"}]}]}"#;
        assert!(matches!(
            SchemaRegistry::from_json_document(text),
            Err(SchemaError::TypeSyntax { .. })
        ));
    }
}
