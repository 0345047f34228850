//! Snapshot copy - value-isolating copies between stored state and caller values.
//!
//! Records go in and out of the store through a serialized round trip, so no
//! mutable state is ever shared between a collection slot and a caller's
//! value. Fields present in a stored record but unknown to the destination
//! type are silently dropped; a field the destination cannot absorb is a copy
//! error.

use serde_json::Value;

use crate::error::StoreError;
use crate::field::kind_of;
use crate::record::Record;

/// Snapshot a caller record into the store's internal representation.
pub(crate) fn to_stored<R: Record>(record: &R) -> Result<Value, StoreError> {
    let value = serde_json::to_value(record).map_err(|e| StoreError::Copy(e.to_string()))?;
    if !value.is_object() {
        return Err(StoreError::UnexpectedType(kind_of(&value).into()));
    }
    Ok(value)
}

/// Copy a stored record out into a caller type.
pub(crate) fn from_stored<R: Record>(value: &Value) -> Result<R, StoreError> {
    serde_json::from_value(value.clone()).map_err(|e| StoreError::Copy(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Full {
        id: u64,
        value: i32,
        note: String,
    }

    impl Record for Full {
        const SHAPE: &'static str = "full";
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Narrow {
        id: u64,
        value: i32,
    }

    impl Record for Narrow {
        const SHAPE: &'static str = "full";
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    struct Bare(u64);

    impl Record for Bare {
        const SHAPE: &'static str = "bare";
    }

    #[test]
    fn round_trip_preserves_fields() {
        let record = Full {
            id: 2,
            value: 7,
            note: "n".into(),
        };
        let stored = to_stored(&record).unwrap();
        let copied: Full = from_stored(&stored).unwrap();
        assert_eq!(copied, record);
    }

    #[test]
    fn unknown_source_fields_are_dropped() {
        let stored = json!({"id": 2, "value": 7, "note": "n"});
        let narrow: Narrow = from_stored(&stored).unwrap();
        assert_eq!(narrow, Narrow { id: 2, value: 7 });
    }

    #[test]
    fn missing_required_field_is_a_copy_error() {
        let stored = json!({"id": 2, "value": 7});
        let err = from_stored::<Full>(&stored).unwrap_err();
        assert!(matches!(err, StoreError::Copy(_)));
    }

    #[test]
    fn non_object_record_is_rejected() {
        let err = to_stored(&Bare(1)).unwrap_err();
        assert_eq!(err, StoreError::UnexpectedType("number".into()));
    }
}
