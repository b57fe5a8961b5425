//! RecordRef: a shared, mutable record instance.
//!
//! A `RecordRef` is a handle: cloning it shares the instance, so records can
//! point at each other and form graphs, cycles included. The encoder tracks
//! instances by [`RecordId`] to reject cycles; equality and `Debug` walk
//! cyclic graphs without recursing forever.
//!
//! Cyclic graphs hold strong references to themselves and are not freed
//! until a link is broken, e.g. by setting a field back to null.

use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thread_local::ThreadLocal;

use super::field_value::coerce;
use super::FieldValue;
use crate::error::CodecError;
use crate::schema::{FieldSchema, RecordSchema};

/// Identity of a record instance, stable while any handle to it is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

#[derive(Clone)]
pub struct RecordRef(Arc<RecordInner>);

struct RecordInner {
    schema: Arc<RecordSchema>,
    values: RwLock<Vec<FieldValue>>,
}

impl RecordRef {
    /// New instance with every field at its default.
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let values = schema
            .fields()
            .map(|field| FieldValue::default_for(&field.shape))
            .collect();
        Self::from_values(schema, values)
    }

    /// Values must already be canonical for their fields, in schema order.
    pub(crate) fn from_values(schema: Arc<RecordSchema>, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self(Arc::new(RecordInner {
            schema,
            values: RwLock::new(values),
        }))
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.0.schema
    }

    pub fn name(&self) -> &str {
        self.0.schema.name()
    }

    pub fn id(&self) -> RecordId {
        RecordId(Arc::as_ptr(&self.0) as usize)
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &RecordRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn get(&self, field: &str) -> Result<FieldValue, CodecError> {
        let (index, _) = self.entry(field)?;
        Ok(self.read()[index].clone())
    }

    /// Assign a field. The value is converted to the field's canonical form
    /// and rejected with [`CodecError::TypeMismatch`] when it does not fit.
    pub fn set(&self, field: &str, value: impl Into<FieldValue>) -> Result<(), CodecError> {
        let (index, schema) = self.entry(field)?;
        let value = coerce(value.into(), &schema.shape).map_err(|e| e.within_key(field))?;
        self.write()[index] = value;
        Ok(())
    }

    /// Snapshot of all field values in schema order.
    pub fn values(&self) -> Vec<FieldValue> {
        self.read().clone()
    }

    fn entry(&self, field: &str) -> Result<(usize, &FieldSchema), CodecError> {
        self.0
            .schema
            .entry(field)
            .ok_or_else(|| CodecError::UnknownField {
                record: self.name().to_string(),
                field: field.to_string(),
            })
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<FieldValue>> {
        self.0.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<FieldValue>> {
        self.0.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}

static COMPARING: ThreadLocal<RefCell<Vec<(RecordId, RecordId)>>> = ThreadLocal::new();
static PRINTING: ThreadLocal<RefCell<Vec<RecordId>>> = ThreadLocal::new();

/// Pops the per-thread walk stack it was pushed onto.
struct Visit<T: 'static>(&'static RefCell<Vec<T>>);

impl<T: PartialEq + Send + 'static> Visit<T> {
    /// `None` when `item` is already being visited on this thread.
    fn enter(stack: &'static ThreadLocal<RefCell<Vec<T>>>, item: T) -> Option<Self> {
        let cell = stack.get_or(|| RefCell::new(Vec::new()));
        let mut visiting = cell.borrow_mut();
        if visiting.contains(&item) {
            return None;
        }
        visiting.push(item);
        Some(Visit(cell))
    }
}

impl<T: 'static> Drop for Visit<T> {
    fn drop(&mut self) {
        self.0.borrow_mut().pop();
    }
}

/// Structural equality: same record type and equal field values. A pair
/// already under comparison is assumed equal, so isomorphic cycles compare
/// equal.
impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.name() != other.name() {
            return false;
        }
        let Some(_visit) = Visit::enter(&COMPARING, (self.id(), other.id())) else {
            return true;
        };
        let (left, right) = (self.values(), other.values());
        left == right
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_visit) = Visit::enter(&PRINTING, self.id()) else {
            return write!(f, "{} {{ <cycle> }}", self.name());
        };
        let values = self.values();
        let mut out = f.debug_struct(self.name());
        for (field, value) in self.0.schema.fields().zip(&values) {
            out.field(&field.name, value);
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, NumberKind, Primitive, Shape};

    fn node_schema() -> Arc<RecordSchema> {
        Arc::new(
            RecordSchema::new(
                "Node",
                [
                    FieldSchema::new("Id", Shape::Primitive(Primitive::Number(NumberKind::Int32))),
                    FieldSchema::new("Next", Shape::RecordNullable("Node".into())),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn handles_share_the_instance() {
        let a = RecordRef::new(node_schema());
        let b = a.clone();
        b.set("Id", 5).unwrap();
        assert_eq!(a.get("Id").unwrap(), FieldValue::Int(5));
        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn unknown_fields_and_bad_values_are_rejected() {
        let a = RecordRef::new(node_schema());
        assert!(matches!(
            a.get("Missing"),
            Err(CodecError::UnknownField { field, .. }) if field == "Missing"
        ));
        let err = a.set("Id", "seven").unwrap_err();
        assert_eq!(err.path(), Some("/Id"));
        assert_eq!(a.get("Id").unwrap(), FieldValue::Int(0));
    }

    #[test]
    fn equality_is_structural_and_cycle_safe() {
        let schema = node_schema();
        let (a, b) = (RecordRef::new(schema.clone()), RecordRef::new(schema.clone()));
        a.set("Id", 1).unwrap();
        b.set("Id", 1).unwrap();
        assert_eq!(a, b);

        a.set("Next", &a).unwrap();
        b.set("Next", &b).unwrap();
        assert_eq!(a, b);

        b.set("Id", 2).unwrap();
        assert_ne!(a, b);

        a.set("Next", None::<RecordRef>).unwrap();
        b.set("Next", None::<RecordRef>).unwrap();
    }

    #[test]
    fn debug_marks_cycles() {
        let a = RecordRef::new(node_schema());
        a.set("Next", &a).unwrap();
        let text = format!("{:?}", a);
        assert!(text.starts_with("Node { Id: Int(0), Next: Record(Node { <cycle> })"), "{text}");
        a.set("Next", None::<RecordRef>).unwrap();
    }
}
