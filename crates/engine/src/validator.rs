//! Identifier consistency checks run before any storage access.
//!
//! Every mutating operation goes through one of these functions first. They
//! only look at the path id and the payload id; existence in storage is
//! checked afterwards by the pipeline.

use crate::{EngineError, EntityDescriptor, PartialRecord, ResultEngine, record::FieldState};

/// A new record must not carry an identifier: identity is assigned on save.
pub fn validate_create(descriptor: &EntityDescriptor, payload: &PartialRecord) -> ResultEngine<()> {
    match payload.id {
        FieldState::Value(_) => Err(EngineError::IdentifierConflict(descriptor.name.to_string())),
        FieldState::Absent | FieldState::Null => Ok(()),
    }
}

/// Full replace: the path id is mandatory and the body must repeat it.
pub fn validate_replace(
    descriptor: &EntityDescriptor,
    path_id: Option<i64>,
    payload: &PartialRecord,
) -> ResultEngine<i64> {
    let path_id = require_path_id(descriptor, path_id)?;
    match payload.id {
        FieldState::Absent | FieldState::Null => Err(null_id(descriptor)),
        FieldState::Value(body_id) => ensure_same_id(descriptor, path_id, body_id),
    }
}

/// Partial update: the path id is mandatory; a body id is optional but must
/// match when given and may not be an explicit null.
pub fn validate_patch(
    descriptor: &EntityDescriptor,
    path_id: Option<i64>,
    payload: &PartialRecord,
) -> ResultEngine<i64> {
    let path_id = require_path_id(descriptor, path_id)?;
    match payload.id {
        FieldState::Absent => Ok(path_id),
        FieldState::Null => Err(null_id(descriptor)),
        FieldState::Value(body_id) => ensure_same_id(descriptor, path_id, body_id),
    }
}

pub fn validate_delete(descriptor: &EntityDescriptor, path_id: Option<i64>) -> ResultEngine<i64> {
    require_path_id(descriptor, path_id)
}

// A missing path segment is a routing failure, not a malformed body.
fn require_path_id(descriptor: &EntityDescriptor, path_id: Option<i64>) -> ResultEngine<i64> {
    path_id.ok_or_else(|| {
        EngineError::MethodNotAllowed(format!("{} requires an id in the path", descriptor.name))
    })
}

fn null_id(descriptor: &EntityDescriptor) -> EngineError {
    EngineError::BadRequest(format!("{} id must not be null", descriptor.name))
}

fn ensure_same_id(descriptor: &EntityDescriptor, path_id: i64, body_id: i64) -> ResultEngine<i64> {
    if path_id != body_id {
        return Err(EngineError::IdentifierMismatch(format!(
            "{} id {body_id} does not match path id {path_id}",
            descriptor.name
        )));
    }
    Ok(path_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityKind;

    fn currency() -> &'static EntityDescriptor {
        EntityKind::Currency.descriptor()
    }

    #[test]
    fn create_rejects_preset_id() {
        let payload = PartialRecord::new().with_id(1).with("code", "EUR");
        let err = validate_create(currency(), &payload).unwrap_err();
        assert_eq!(err, EngineError::IdentifierConflict("currency".to_string()));
    }

    #[test]
    fn create_accepts_absent_or_null_id() {
        assert!(validate_create(currency(), &PartialRecord::new()).is_ok());
        assert!(validate_create(currency(), &PartialRecord::new().with_null_id()).is_ok());
    }

    #[test]
    fn replace_without_path_id_is_method_not_allowed() {
        let payload = PartialRecord::new().with_id(1);
        let err = validate_replace(currency(), None, &payload).unwrap_err();
        assert!(matches!(err, EngineError::MethodNotAllowed(_)));
    }

    #[test]
    fn replace_requires_body_id() {
        let err = validate_replace(currency(), Some(1), &PartialRecord::new()).unwrap_err();
        assert!(matches!(err, EngineError::BadRequest(_)));

        let err = validate_replace(currency(), Some(1), &PartialRecord::new().with_null_id())
            .unwrap_err();
        assert!(matches!(err, EngineError::BadRequest(_)));
    }

    #[test]
    fn replace_rejects_mismatched_ids() {
        let err = validate_replace(currency(), Some(1), &PartialRecord::new().with_id(2))
            .unwrap_err();
        assert!(matches!(err, EngineError::IdentifierMismatch(_)));
        assert_eq!(
            validate_replace(currency(), Some(2), &PartialRecord::new().with_id(2)),
            Ok(2)
        );
    }

    #[test]
    fn patch_uses_path_id_when_body_omits_it() {
        assert_eq!(validate_patch(currency(), Some(7), &PartialRecord::new()), Ok(7));
    }

    #[test]
    fn patch_rejects_null_and_mismatched_ids() {
        let err = validate_patch(currency(), Some(7), &PartialRecord::new().with_null_id())
            .unwrap_err();
        assert!(matches!(err, EngineError::BadRequest(_)));

        let err = validate_patch(currency(), Some(7), &PartialRecord::new().with_id(8))
            .unwrap_err();
        assert!(matches!(err, EngineError::IdentifierMismatch(_)));

        let err = validate_patch(currency(), None, &PartialRecord::new().with_id(8)).unwrap_err();
        assert!(matches!(err, EngineError::MethodNotAllowed(_)));
    }

    #[test]
    fn delete_requires_path_id() {
        assert_eq!(validate_delete(currency(), Some(3)), Ok(3));
        assert!(matches!(
            validate_delete(currency(), None),
            Err(EngineError::MethodNotAllowed(_))
        ));
    }
}
