//! JSON wire format of records.
//!
//! Decoding keeps the difference between a missing key and an explicit
//! `null`, which `serde`'s `Option` would erase, so it walks the JSON object
//! by hand against the entity descriptor.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{
    EngineError, EntityDescriptor, PartialRecord, Record, ResultEngine,
    descriptor::{FieldDescriptor, FieldType},
    record::{FieldState, FieldValue},
};

const ID: &str = "id";

/// Decode a request body into a partial record.
pub fn decode(descriptor: &EntityDescriptor, body: Value) -> ResultEngine<PartialRecord> {
    let Value::Object(mut object) = body else {
        return Err(EngineError::Validation(format!(
            "{} body must be a JSON object",
            descriptor.name
        )));
    };

    let mut payload = PartialRecord::new();
    payload.id = decode_id(descriptor, object.remove(ID))?;

    for field in descriptor.fields {
        match object.remove(field.name) {
            None => {}
            Some(Value::Null) => payload.set_null(field.name),
            Some(value) => payload.set(field.name, decode_value(descriptor, field, value)?),
        }
    }

    for unknown in object.keys() {
        tracing::debug!("ignoring unknown {} property \"{unknown}\"", descriptor.name);
    }

    Ok(payload)
}

/// Encode a record as a JSON object holding the id and every field.
pub fn encode(descriptor: &EntityDescriptor, record: &Record) -> Value {
    let mut object = Map::new();
    object.insert(ID.to_string(), record.id.map_or(Value::Null, Value::from));
    for field in descriptor.fields {
        let value = record.get(field.name).map_or(Value::Null, encode_value);
        object.insert(field.name.to_string(), value);
    }
    Value::Object(object)
}

fn decode_id(descriptor: &EntityDescriptor, value: Option<Value>) -> ResultEngine<FieldState<i64>> {
    match value {
        None => Ok(FieldState::Absent),
        Some(Value::Null) => Ok(FieldState::Null),
        Some(Value::Number(number)) => number.as_i64().map(FieldState::Value).ok_or_else(|| {
            EngineError::MalformedId(format!("{} id {number} is not an integer", descriptor.name))
        }),
        Some(other) => Err(EngineError::MalformedId(format!(
            "{} id must be an integer, got {other}",
            descriptor.name
        ))),
    }
}

fn decode_value(
    descriptor: &EntityDescriptor,
    field: &FieldDescriptor,
    value: Value,
) -> ResultEngine<FieldValue> {
    let invalid = || {
        EngineError::Validation(format!(
            "{}.{} must be of type {}",
            descriptor.name,
            field.name,
            field.ty.label()
        ))
    };

    match (field.ty, value) {
        (FieldType::Text, Value::String(text)) => Ok(FieldValue::Text(text)),
        (FieldType::Decimal, Value::Number(number)) => {
            parse_decimal(&number.to_string()).map(FieldValue::Decimal).ok_or_else(invalid)
        }
        (FieldType::Decimal, Value::String(text)) => {
            parse_decimal(text.trim()).map(FieldValue::Decimal).ok_or_else(invalid)
        }
        (FieldType::Instant, Value::String(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|instant| FieldValue::Instant(instant.with_timezone(&Utc)))
            .map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text.clone()),
        // A JSON number would go through an f64 and drop digits.
        FieldValue::Decimal(decimal) => Value::String(decimal.to_string()),
        FieldValue::Instant(instant) => {
            Value::String(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
    }
}
