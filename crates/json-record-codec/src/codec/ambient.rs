//! Ambient codec: the fallback for field types with no record schema.
//!
//! Ambient fields hold a [`serde_json::Value`]. On encode the value is handed
//! to [`AmbientJson::to_json`] and the returned tree is written in the
//! current style; on decode the JSON subtree is handed to
//! [`AmbientJson::from_json`].

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CodecError;

pub trait AmbientJson: Send + Sync {
    fn to_json(&self, type_name: &str, value: &Value) -> Result<Value, CodecError>;

    fn from_json(&self, type_name: &str, json: &Value) -> Result<Value, CodecError>;
}

/// Keeps ambient values unchanged in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl AmbientJson for PassThrough {
    fn to_json(&self, _type_name: &str, value: &Value) -> Result<Value, CodecError> {
        Ok(value.clone())
    }

    fn from_json(&self, _type_name: &str, json: &Value) -> Result<Value, CodecError> {
        Ok(json.clone())
    }
}

type Normalizer = Box<dyn Fn(&Value) -> Result<Value, serde_json::Error> + Send + Sync>;

/// Validates ambient values against registered serde types.
///
/// A value of a registered type is deserialized into that type and
/// serialized back, in both directions. Names without a registration pass
/// through unchanged.
///
/// ```
/// use json_record_codec::{AmbientJson, SerdeAmbient};
/// use serde_json::json;
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let ambient = SerdeAmbient::new().register::<Point>("Point");
/// assert!(ambient.from_json("Point", &json!({"x": 1, "y": 2})).is_ok());
/// assert!(ambient.from_json("Point", &json!({"x": "one"})).is_err());
/// ```
#[derive(Default)]
pub struct SerdeAmbient {
    normalizers: HashMap<String, Normalizer>,
}

impl SerdeAmbient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(mut self, type_name: impl Into<String>) -> Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let normalize: Normalizer = Box::new(|value: &Value| {
            let typed: T = serde_json::from_value(value.clone())?;
            serde_json::to_value(typed)
        });
        self.normalizers.insert(type_name.into(), normalize);
        self
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.normalizers.contains_key(type_name)
    }

    fn normalize(&self, type_name: &str, value: &Value) -> Result<Value, CodecError> {
        match self.normalizers.get(type_name) {
            Some(normalize) => normalize(value).map_err(|e| CodecError::Ambient {
                type_name: type_name.to_string(),
                path: String::new(),
                message: e.to_string(),
            }),
            None => Ok(value.clone()),
        }
    }
}

impl AmbientJson for SerdeAmbient {
    fn to_json(&self, type_name: &str, value: &Value) -> Result<Value, CodecError> {
        self.normalize(type_name, value)
    }

    fn from_json(&self, type_name: &str, json: &Value) -> Result<Value, CodecError> {
        self.normalize(type_name, json)
    }
}

impl fmt::Debug for SerdeAmbient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.normalizers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SerdeAmbient").field("types", &names).finish()
    }
}
