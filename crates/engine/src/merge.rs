//! Computes the record to persist from a payload, and optionally the
//! existing record.
//!
//! Everything here is pure: the pipeline loads and saves, this module only
//! decides what the new state looks like.

use crate::{
    EngineError, EntityDescriptor, PartialRecord, Record, ResultEngine,
    descriptor::FieldDescriptor,
    record::{FieldState, FieldValue},
};

/// Build a record for a create: id is left for the repository to assign.
pub fn build_new(descriptor: &EntityDescriptor, payload: &PartialRecord) -> ResultEngine<Record> {
    build_full(descriptor, None, payload)
}

/// Build a record for a full replace of `id`.
pub fn build_replacement(
    descriptor: &EntityDescriptor,
    id: i64,
    payload: &PartialRecord,
) -> ResultEngine<Record> {
    build_full(descriptor, Some(id), payload)
}

/// Merge-patch `payload` onto `existing`.
///
/// Absent fields keep their value, explicit nulls clear optional fields and
/// values overwrite. The id of `existing` is never touched.
pub fn merge_patch(
    descriptor: &EntityDescriptor,
    existing: &Record,
    payload: &PartialRecord,
) -> ResultEngine<Record> {
    let mut merged = existing.clone();
    for field in descriptor.fields {
        match payload.state(field.name) {
            FieldState::Absent => {}
            FieldState::Null if field.required => return Err(required(descriptor, field)),
            FieldState::Null => merged.insert(field.name, None),
            FieldState::Value(value) => {
                merged.insert(field.name, Some(checked(descriptor, field, value)?));
            }
        }
    }
    Ok(merged)
}

fn build_full(
    descriptor: &EntityDescriptor,
    id: Option<i64>,
    payload: &PartialRecord,
) -> ResultEngine<Record> {
    let mut record = Record::new(id);
    for field in descriptor.fields {
        let value = match payload.state(field.name) {
            FieldState::Value(value) => Some(checked(descriptor, field, value)?),
            FieldState::Absent | FieldState::Null if field.required => {
                return Err(required(descriptor, field));
            }
            FieldState::Absent | FieldState::Null => None,
        };
        record.insert(field.name, value);
    }
    Ok(record)
}

fn checked(
    descriptor: &EntityDescriptor,
    field: &FieldDescriptor,
    value: &FieldValue,
) -> ResultEngine<FieldValue> {
    if value.field_type() != field.ty {
        return Err(EngineError::Validation(format!(
            "{}.{} must be of type {}",
            descriptor.name,
            field.name,
            field.ty.label()
        )));
    }
    Ok(value.clone())
}

fn required(descriptor: &EntityDescriptor, field: &FieldDescriptor) -> EngineError {
    EngineError::Validation(format!("{}.{} must not be null", descriptor.name, field.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn currency() -> &'static EntityDescriptor {
        EntityKind::Currency.descriptor()
    }

    fn persisted_currency() -> Record {
        Record::new(Some(1))
            .with("code", Some("AAAAAAAAAA".into()))
            .with("name", Some("Euro".into()))
            .with("symbol", Some("€".into()))
    }

    #[test]
    fn build_new_requires_every_required_field() {
        let payload = PartialRecord::new().with("code", "EUR");
        let err = build_new(currency(), &payload).unwrap_err();
        assert_eq!(err, EngineError::Validation("currency.name must not be null".to_string()));

        let payload = PartialRecord::new().with("code", "EUR").with_null("name");
        assert!(matches!(
            build_new(currency(), &payload),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn build_new_leaves_id_unset_and_optional_fields_null() {
        let payload = PartialRecord::new().with("code", "EUR").with("name", "Euro");
        let record = build_new(currency(), &payload).unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.get("code"), Some(&FieldValue::from("EUR")));
        assert_eq!(record.get("symbol"), None);
    }

    #[test]
    fn replacement_keeps_the_validated_id() {
        let payload = PartialRecord::new()
            .with_id(5)
            .with("code", "USD")
            .with("name", "Dollar");
        let record = build_replacement(currency(), 5, &payload).unwrap();
        assert_eq!(record.id, Some(5));
        assert_eq!(record.get("symbol"), None);
    }

    #[test]
    fn patch_changes_only_supplied_fields() {
        let payload = PartialRecord::new().with_id(1).with("code", "BBBBBBBBBB");
        let merged = merge_patch(currency(), &persisted_currency(), &payload).unwrap();

        assert_eq!(merged.id, Some(1));
        assert_eq!(merged.get("code"), Some(&FieldValue::from("BBBBBBBBBB")));
        assert_eq!(merged.get("name"), Some(&FieldValue::from("Euro")));
        assert_eq!(merged.get("symbol"), Some(&FieldValue::from("€")));
    }

    #[test]
    fn patch_null_clears_optional_field() {
        let payload = PartialRecord::new().with_null("symbol");
        let merged = merge_patch(currency(), &persisted_currency(), &payload).unwrap();
        assert_eq!(merged.get("symbol"), None);
        assert_eq!(merged.get("name"), Some(&FieldValue::from("Euro")));
    }

    #[test]
    fn patch_null_on_required_field_fails() {
        let payload = PartialRecord::new().with_null("name");
        let err = merge_patch(currency(), &persisted_currency(), &payload).unwrap_err();
        assert_eq!(err, EngineError::Validation("currency.name must not be null".to_string()));
    }

    #[test]
    fn patch_never_changes_the_id() {
        let payload = PartialRecord::new().with_id(99).with("name", "Other");
        let merged = merge_patch(currency(), &persisted_currency(), &payload).unwrap();
        assert_eq!(merged.id, Some(1));
    }

    #[test]
    fn full_patch_matches_full_replace() {
        let payload = PartialRecord::new()
            .with_id(1)
            .with("code", "USD")
            .with("name", "Dollar")
            .with("symbol", "$");
        let patched = merge_patch(currency(), &persisted_currency(), &payload).unwrap();
        let replaced = build_replacement(currency(), 1, &payload).unwrap();
        assert_eq!(patched, replaced);
    }

    #[test]
    fn rejects_values_of_the_wrong_type() {
        let payload = PartialRecord::new()
            .with("code", "VAT20")
            .with("percentage", "twenty");
        let err = build_new(EntityKind::VatRate.descriptor(), &payload).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("vatRate.percentage must be of type decimal".to_string())
        );
    }

    #[test]
    fn setting_a_field_to_its_current_value_is_still_an_update() {
        let payload = PartialRecord::new()
            .with("percentage", Decimal::from_str("20.00").unwrap());
        let existing = Record::new(Some(4))
            .with("code", Some("VAT20".into()))
            .with("percentage", Some(Decimal::from(20).into()));
        let merged = merge_patch(EntityKind::VatRate.descriptor(), &existing, &payload).unwrap();
        assert!(EntityKind::VatRate.descriptor().records_equal(&merged, &existing));
    }
}
