//! Records as the engine sees them, independently of their table.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{EngineError, ResultEngine, descriptor::FieldType};

/// A typed field value.
///
/// `PartialEq` on decimals is numeric; use
/// [`FieldDescriptor::values_equal`](crate::FieldDescriptor::values_equal)
/// when the scale matters.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Decimal(Decimal),
    Instant(DateTime<Utc>),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Decimal(_) => FieldType::Decimal,
            FieldValue::Instant(_) => FieldType::Instant,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Instant(value)
    }
}

/// Presence state of a field in an incoming payload.
///
/// `Absent` (key missing) and `Null` (key present with `null`) mean different
/// things to a merge patch, so they are never folded into an `Option`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldState<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> FieldState<T> {
    pub fn as_ref(&self) -> FieldState<&T> {
        match self {
            FieldState::Absent => FieldState::Absent,
            FieldState::Null => FieldState::Null,
            FieldState::Value(value) => FieldState::Value(value),
        }
    }
}

/// Incoming representation of an entity, as decoded from a request body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialRecord {
    pub id: FieldState<i64>,
    fields: BTreeMap<&'static str, FieldState<FieldValue>>,
}

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = FieldState::Value(id);
        self
    }

    #[cfg(test)]
    pub fn with_null_id(mut self) -> Self {
        self.id = FieldState::Null;
        self
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        self.fields.insert(name, FieldState::Value(value.into()));
    }

    pub fn set_null(&mut self, name: &'static str) {
        self.fields.insert(name, FieldState::Null);
    }

    pub fn with(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_null(mut self, name: &'static str) -> Self {
        self.set_null(name);
        self
    }

    /// State of a field; fields never mentioned are `Absent`.
    pub fn state(&self, name: &str) -> FieldState<&FieldValue> {
        self.fields
            .get(name)
            .map_or(FieldState::Absent, FieldState::as_ref)
    }
}

/// A persisted (or about to be persisted) entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// `None` until the repository assigns one.
    pub id: Option<i64>,
    fields: BTreeMap<&'static str, Option<FieldValue>>,
}

impl Record {
    pub fn new(id: Option<i64>) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &'static str, value: Option<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &'static str, value: Option<FieldValue>) {
        self.fields.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).and_then(Option::as_ref)
    }

    pub fn optional_text(&self, name: &str) -> ResultEngine<Option<String>> {
        match self.get(name) {
            None => Ok(None),
            Some(FieldValue::Text(value)) => Ok(Some(value.clone())),
            Some(other) => Err(type_mismatch(name, FieldType::Text, other)),
        }
    }

    pub fn text(&self, name: &str) -> ResultEngine<String> {
        self.optional_text(name)?.ok_or_else(|| missing(name))
    }

    pub fn optional_decimal(&self, name: &str) -> ResultEngine<Option<Decimal>> {
        match self.get(name) {
            None => Ok(None),
            Some(FieldValue::Decimal(value)) => Ok(Some(*value)),
            Some(other) => Err(type_mismatch(name, FieldType::Decimal, other)),
        }
    }

    pub fn decimal(&self, name: &str) -> ResultEngine<Decimal> {
        self.optional_decimal(name)?.ok_or_else(|| missing(name))
    }

    pub fn optional_instant(&self, name: &str) -> ResultEngine<Option<DateTime<Utc>>> {
        match self.get(name) {
            None => Ok(None),
            Some(FieldValue::Instant(value)) => Ok(Some(*value)),
            Some(other) => Err(type_mismatch(name, FieldType::Instant, other)),
        }
    }

    pub fn instant(&self, name: &str) -> ResultEngine<DateTime<Utc>> {
        self.optional_instant(name)?.ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> EngineError {
    EngineError::Validation(format!("{name} must not be null"))
}

fn type_mismatch(name: &str, expected: FieldType, found: &FieldValue) -> EngineError {
    EngineError::Validation(format!(
        "{name} must be of type {}, got {}",
        expected.label(),
        found.field_type().label()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmentioned_fields_are_absent() {
        let payload = PartialRecord::new().with("code", "EUR").with_null("symbol");

        assert_eq!(payload.state("code"), FieldState::Value(&FieldValue::from("EUR")));
        assert_eq!(payload.state("symbol"), FieldState::Null);
        assert_eq!(payload.state("name"), FieldState::Absent);
        assert_eq!(payload.id, FieldState::Absent);
    }

    #[test]
    fn typed_getters_reject_wrong_types() {
        let record = Record::new(Some(3)).with("code", Some(FieldValue::from("EUR")));

        assert_eq!(record.text("code"), Ok("EUR".to_string()));
        assert!(matches!(record.decimal("code"), Err(EngineError::Validation(_))));
        assert_eq!(record.optional_text("symbol"), Ok(None));
        assert!(matches!(record.text("symbol"), Err(EngineError::Validation(_))));
    }
}
