//! JsonTextWriter: token writer producing compact or indented text.
//!
//! Indented output follows `serde_json::to_string_pretty`: a newline and
//! indentation before every member, `": "` after keys, and empty containers
//! written as `{}` / `[]`.

use serde_json::Value;

use super::format::{quote, EscapePolicy, Style, INDENT};
use crate::error::CodecError;

pub(crate) struct JsonTextWriter {
    out: String,
    style: Style,
    escape: EscapePolicy,
    /// One entry per open container: whether it has a member yet.
    frames: Vec<bool>,
}

impl JsonTextWriter {
    pub(crate) fn new(style: Style, escape: EscapePolicy) -> Self {
        Self {
            out: String::with_capacity(128),
            style,
            escape,
            frames: Vec::new(),
        }
    }

    pub(crate) fn begin_object(&mut self) {
        self.out.push('{');
        self.frames.push(false);
    }

    pub(crate) fn key(&mut self, key: &str) -> Result<(), CodecError> {
        self.member();
        self.string(key)?;
        self.out.push(':');
        if self.style == Style::Indented {
            self.out.push(' ');
        }
        Ok(())
    }

    pub(crate) fn end_object(&mut self) {
        self.close('}');
    }

    pub(crate) fn begin_array(&mut self) {
        self.out.push('[');
        self.frames.push(false);
    }

    pub(crate) fn element(&mut self) {
        self.member();
    }

    pub(crate) fn end_array(&mut self) {
        self.close(']');
    }

    pub(crate) fn null(&mut self) {
        self.out.push_str("null");
    }

    pub(crate) fn bool(&mut self, value: bool) {
        self.out.push_str(if value { "true" } else { "false" });
    }

    /// Write pre-formatted token text.
    pub(crate) fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(crate) fn string(&mut self, value: &str) -> Result<(), CodecError> {
        let quoted = quote(value, self.escape)?;
        self.out.push_str(&quoted);
        Ok(())
    }

    /// Write a JSON tree in the writer's style and escape policy.
    pub(crate) fn json(&mut self, value: &Value) -> Result<(), CodecError> {
        match value {
            Value::Null => self.null(),
            Value::Bool(b) => self.bool(*b),
            Value::Number(n) => self.raw(&n.to_string()),
            Value::String(s) => self.string(s)?,
            Value::Array(items) => {
                self.begin_array();
                for item in items {
                    self.element();
                    self.json(item)?;
                }
                self.end_array();
            }
            Value::Object(map) => {
                self.begin_object();
                for (key, item) in map {
                    self.key(key)?;
                    self.json(item)?;
                }
                self.end_object();
            }
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> String {
        debug_assert!(self.frames.is_empty());
        self.out
    }

    fn member(&mut self) {
        if let Some(has_members) = self.frames.last_mut() {
            if *has_members {
                self.out.push(',');
            }
            *has_members = true;
        }
        if self.style == Style::Indented {
            self.newline();
        }
    }

    fn close(&mut self, bracket: char) {
        let had_members = self.frames.pop().unwrap_or(false);
        if had_members && self.style == Style::Indented {
            self.newline();
        }
        self.out.push(bracket);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.frames.len() {
            self.out.push_str(INDENT);
        }
    }
}
