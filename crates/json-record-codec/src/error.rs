//! Error types for schema building and record encoding/decoding.
//!
//! Codec errors that point at a value carry a JSON Pointer (RFC 6901) path.
//! The path is assembled while the error unwinds out of nested records and
//! sequences, so the success path never pays for it.

use thiserror::Error;

/// Errors raised while building a [`SchemaRegistry`](crate::schema::SchemaRegistry).
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("record `{0}` is declared more than once")]
    DuplicateRecord(String),
    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },
    #[error("invalid type expression `{input}`: {message}")]
    TypeSyntax { input: String, message: String },
    #[error("invalid schema document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed an absent input.
    Argument,
    /// The text is not valid JSON or a value does not fit the schema.
    MalformedInput,
    /// An instance was reached twice on the same encode path.
    CircularReference,
    /// Schema lookup failures and writer-level rejections.
    Other,
}

/// Errors raised by [`JsonCodec`](crate::codec::JsonCodec) and record access.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("argument `{name}` must not be absent")]
    Argument { name: &'static str },
    #[error("malformed input at {}: {message}", display_path(.path))]
    Malformed { path: String, message: String },
    #[error("circular reference to record `{record}` detected at {}", display_path(.path))]
    CircularReference { record: String, path: String },
    #[error("unknown record schema `{0}`")]
    UnknownSchema(String),
    #[error("record `{record}` has no field `{field}`")]
    UnknownField { record: String, field: String },
    #[error("type mismatch at {}: expected {expected}, found {found}", display_path(.path))]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },
    #[error("unsupported value at {}: {message}", display_path(.path))]
    UnsupportedValue { path: String, message: String },
    #[error("ambient codec failed for `{type_name}` at {}: {message}", display_path(.path))]
    Ambient {
        type_name: String,
        path: String,
        message: String,
    },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Argument { .. } => ErrorKind::Argument,
            Self::Malformed { .. } => ErrorKind::MalformedInput,
            Self::CircularReference { .. } => ErrorKind::CircularReference,
            Self::UnknownSchema(_)
            | Self::UnknownField { .. }
            | Self::TypeMismatch { .. }
            | Self::UnsupportedValue { .. }
            | Self::Ambient { .. } => ErrorKind::Other,
        }
    }

    /// JSON Pointer of the offending value, when the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Malformed { path, .. }
            | Self::CircularReference { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnsupportedValue { path, .. }
            | Self::Ambient { path, .. } => Some(path),
            Self::Argument { .. } | Self::UnknownSchema(_) | Self::UnknownField { .. } => None,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            path: String::new(),
            message: message.into(),
        }
    }

    pub(crate) fn mismatch(expected: impl ToString, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            path: String::new(),
            expected: expected.to_string(),
            found: found.into(),
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            path: String::new(),
            message: message.into(),
        }
    }

    /// Prefix the error path with an object key.
    pub(crate) fn within_key(self, key: &str) -> Self {
        self.prefix_path(&escape_component(key))
    }

    /// Prefix the error path with an array index.
    pub(crate) fn within_index(self, index: usize) -> Self {
        self.prefix_path(&index.to_string())
    }

    fn prefix_path(mut self, component: &str) -> Self {
        match &mut self {
            Self::Malformed { path, .. }
            | Self::CircularReference { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnsupportedValue { path, .. }
            | Self::Ambient { path, .. } => {
                path.insert_str(0, component);
                path.insert(0, '/');
            }
            Self::Argument { .. } | Self::UnknownSchema(_) | Self::UnknownField { .. } => {}
        }
        self
    }
}

fn escape_component(key: &str) -> String {
    if !key.contains(|c: char| c == '~' || c == '/') {
        return key.to_string();
    }
    key.replace('~', "~0").replace('/', "~1")
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "the root".to_string()
    } else {
        format!("`{}`", path)
    }
}
