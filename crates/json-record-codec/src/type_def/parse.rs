//! Text notation for [`TypeExpr`].
//!
//! ```text
//! type  := atom '?'*
//! atom  := 'Option' '<' type '>'
//!        | 'Vec' '<' type '>'
//!        | '[' type ']'
//!        | ident
//! ```
//!
//! Identifiers name a primitive (`bool`, `string`, `i32`, `Int32`, `decimal`,
//! ...) or, failing that, a named type.

use std::str::FromStr;

use super::TypeExpr;
use crate::error::SchemaError;
use crate::schema::NumberKind;

impl TypeExpr {
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        let mut parser = Parser { input, pos: 0 };
        let expr = parser.type_expr()?;
        parser.skip_ws();
        if parser.pos < input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }
}

impl FromStr for TypeExpr {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn type_expr(&mut self) -> Result<TypeExpr, SchemaError> {
        let mut expr = self.atom()?;
        loop {
            self.skip_ws();
            if !self.eat('?') {
                return Ok(expr);
            }
            expr = TypeExpr::Nullable(Box::new(expr));
        }
    }

    fn atom(&mut self) -> Result<TypeExpr, SchemaError> {
        self.skip_ws();
        if self.eat('[') {
            let element = self.type_expr()?;
            self.expect(']')?;
            return Ok(TypeExpr::Array(Box::new(element)));
        }
        let ident = self.ident()?;
        match ident {
            "Option" => Ok(TypeExpr::Optional(Box::new(self.generic_argument()?))),
            "Vec" => Ok(TypeExpr::List(Box::new(self.generic_argument()?))),
            _ => Ok(primitive(ident).unwrap_or_else(|| TypeExpr::Named(ident.to_string()))),
        }
    }

    fn generic_argument(&mut self) -> Result<TypeExpr, SchemaError> {
        self.expect('<')?;
        let inner = self.type_expr()?;
        self.expect('>')?;
        Ok(inner)
    }

    fn ident(&mut self) -> Result<&'a str, SchemaError> {
        self.skip_ws();
        let input = self.input;
        let start = self.pos;
        let rest = &input[start..];
        let len = rest
            .char_indices()
            .find(|&(i, c)| !is_ident_char(c, i == 0))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return Err(self.error("expected a type name"));
        }
        self.pos += len;
        Ok(&input[start..self.pos])
    }

    fn expect(&mut self, c: char) -> Result<(), SchemaError> {
        self.skip_ws();
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", c)))
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.input[self.pos..].starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, message: &str) -> SchemaError {
        SchemaError::TypeSyntax {
            input: self.input.to_string(),
            message: format!("{} at offset {}", message, self.pos),
        }
    }
}

fn is_ident_char(c: char, first: bool) -> bool {
    if first {
        c.is_alphabetic() || c == '_'
    } else {
        c.is_alphanumeric() || matches!(c, '_' | ':' | '.')
    }
}

fn primitive(ident: &str) -> Option<TypeExpr> {
    match ident {
        "bool" | "Boolean" => Some(TypeExpr::Bool),
        "string" | "String" | "str" => Some(TypeExpr::String),
        "byte" => Some(TypeExpr::Number(NumberKind::Byte)),
        "sbyte" => Some(TypeExpr::Number(NumberKind::SByte)),
        _ => NumberKind::from_name(ident).map(TypeExpr::Number),
    }
}
