//! Record construction and access

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{RecordError, RecordResult};
use super::value::FieldValue;
use super::{REQUIRED_FIELDS, UNIQUE_FIELD};

/// A validated configuration record.
///
/// Always contains every required field, and the unique field is always a
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Record {
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Builds a record from an already-typed field map
    pub fn from_fields(fields: BTreeMap<String, FieldValue>) -> RecordResult<Self> {
        for required in REQUIRED_FIELDS {
            if !fields.contains_key(required) {
                return Err(RecordError::MissingField(required.to_string()));
            }
        }

        match fields.get(UNIQUE_FIELD) {
            Some(FieldValue::String(_)) => Ok(Self { fields }),
            _ => Err(RecordError::UniqueNotString(UNIQUE_FIELD.to_string())),
        }
    }

    /// Builds a record from decoded JSON.
    ///
    /// On any failure the whole input is discarded.
    pub fn from_json(value: Value) -> RecordResult<Self> {
        let object = match value {
            Value::Object(object) => object,
            Value::Null => return Err(RecordError::NotAnObject("null")),
            Value::Bool(_) => return Err(RecordError::NotAnObject("bool")),
            Value::Number(_) => return Err(RecordError::NotAnObject("number")),
            Value::String(_) => return Err(RecordError::NotAnObject("string")),
            Value::Array(_) => return Err(RecordError::NotAnObject("array")),
        };

        let mut fields = BTreeMap::new();
        for (field, raw) in object {
            let value = FieldValue::from_json(raw)
                .map_err(|kind| RecordError::UnsupportedValue { field: field.clone(), kind })?;
            fields.insert(field, value);
        }

        Self::from_fields(fields)
    }

    /// Value of the unique field
    pub fn unique_value(&self) -> &str {
        self.fields
            .get(UNIQUE_FIELD)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
    }

    /// Looks up a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Never true for a constructed record
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Value> for Record {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}
