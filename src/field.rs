//! Field accessor - get/set of a named field on a record by string key.
//!
//! The value-level functions operate on the store's internal representation
//! (`serde_json::Value`); the typed functions round-trip a caller's concrete
//! record type through it. Both enforce the same structural contract: the
//! record must be an object, and the field must already exist — a write never
//! invents a new field on a shape.
//!
//! Unlike the rest of the crate surface, these functions are not re-exported
//! at the root: call them module-qualified (`field::read`, `field::write`),
//! since bare `read`/`write` say too little at a call site.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// Human-readable kind of a JSON value, for `UnexpectedType` messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read the named field off a stored record.
pub fn read(value: &Value, name: &str) -> Result<Value, StoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::UnexpectedType(kind_of(value).into()))?;
    object
        .get(name)
        .cloned()
        .ok_or_else(|| StoreError::FieldNotFound(name.into()))
}

/// Overwrite the named field on a stored record in place.
pub fn write(value: &mut Value, name: &str, field: Value) -> Result<(), StoreError> {
    let object = match value {
        Value::Object(object) => object,
        other => return Err(StoreError::UnexpectedType(kind_of(other).into())),
    };
    if !object.contains_key(name) {
        return Err(StoreError::FieldNotFound(name.into()));
    }
    object.insert(name.to_string(), field);
    Ok(())
}

/// Read the named field off a typed record.
pub fn read_from<R: Serialize>(record: &R, name: &str) -> Result<Value, StoreError> {
    let value = serde_json::to_value(record).map_err(|e| StoreError::Copy(e.to_string()))?;
    read(&value, name)
}

/// Overwrite the named field on a typed record, mutating it in place.
///
/// The record is round-tripped through its serialized form. If the concrete
/// type cannot absorb the written value back (e.g. the field's declared type
/// rejects it), the write fails with `Unaddressable` and the record is left
/// untouched.
pub fn write_into<R>(record: &mut R, name: &str, field: Value) -> Result<(), StoreError>
where
    R: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(&*record).map_err(|e| StoreError::Copy(e.to_string()))?;
    write(&mut value, name, field)?;
    *record = serde_json::from_value(value).map_err(|_| StoreError::Unaddressable)?;
    Ok(())
}

/// Read a stored record's surrogate identifier.
pub(crate) fn read_id(value: &Value, key: &str) -> Result<u64, StoreError> {
    let id = read(value, key)?;
    id.as_u64()
        .ok_or_else(|| StoreError::UnexpectedType(kind_of(&id).into()))
}

/// Stamp an identifier onto a stored record.
pub(crate) fn stamp_id(value: &mut Value, key: &str, id: u64) -> Result<(), StoreError> {
    write(value, key, Value::from(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: u64,
        label: String,
    }

    #[test]
    fn read_existing_field() {
        let value = json!({"id": 3, "label": "a"});
        assert_eq!(read(&value, "label").unwrap(), json!("a"));
    }

    #[test]
    fn read_missing_field_fails() {
        let value = json!({"id": 3});
        let err = read(&value, "label").unwrap_err();
        assert_eq!(err, StoreError::FieldNotFound("label".into()));
    }

    #[test]
    fn read_non_object_fails() {
        let err = read(&json!(42), "id").unwrap_err();
        assert_eq!(err, StoreError::UnexpectedType("number".into()));
    }

    #[test]
    fn write_overwrites_existing_field() {
        let mut value = json!({"id": 3, "label": "a"});
        write(&mut value, "label", json!("b")).unwrap();
        assert_eq!(value, json!({"id": 3, "label": "b"}));
    }

    #[test]
    fn write_never_invents_a_field() {
        let mut value = json!({"id": 3});
        let err = write(&mut value, "label", json!("b")).unwrap_err();
        assert_eq!(err, StoreError::FieldNotFound("label".into()));
        assert_eq!(value, json!({"id": 3}));
    }

    #[test]
    fn typed_read_and_write() {
        let mut widget = Widget {
            id: 0,
            label: "a".into(),
        };
        write_into(&mut widget, "id", json!(7)).unwrap();
        assert_eq!(widget.id, 7);
        assert_eq!(read_from(&widget, "label").unwrap(), json!("a"));
    }

    #[test]
    fn typed_write_rejecting_value_is_unaddressable() {
        let mut widget = Widget {
            id: 1,
            label: "a".into(),
        };
        let err = write_into(&mut widget, "label", json!(5)).unwrap_err();
        assert_eq!(err, StoreError::Unaddressable);
        assert_eq!(widget.label, "a"); // untouched on failure
    }

    #[test]
    fn id_helpers_round_trip() {
        let mut value = json!({"id": 0, "label": "a"});
        stamp_id(&mut value, "id", 9).unwrap();
        assert_eq!(read_id(&value, "id").unwrap(), 9);
    }

    #[test]
    fn read_id_rejects_non_integer() {
        let value = json!({"id": "nine"});
        let err = read_id(&value, "id").unwrap_err();
        assert_eq!(err, StoreError::UnexpectedType("string".into()));
    }
}
