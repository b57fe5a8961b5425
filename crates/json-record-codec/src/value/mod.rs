//! Runtime values: record instances and the values their fields hold.

pub mod decimal;
pub mod field_value;
pub mod record;

pub use decimal::{Decimal, ParseDecimalError};
pub use field_value::FieldValue;
pub use record::{RecordId, RecordRef};
