//! Field descriptors for resource attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Int,
    Bool,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {field}: expected {expected}, got '{value}'")]
pub struct SchemaError {
    pub field: String,
    pub expected: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub force_new: bool,
}

impl FieldSchema {
    /// A required string that replaces the resource when changed.
    pub fn key_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
            force_new: true,
        }
    }

    /// Converts a raw identifier segment into this field's declared type.
    pub fn coerce(&self, field: &str, raw: &str) -> Result<Value, SchemaError> {
        let invalid = || SchemaError {
            field: field.to_string(),
            expected: self.field_type.as_str(),
            value: raw.to_string(),
        };

        match self.field_type {
            FieldType::String => Ok(Value::String(raw.to_string())),
            FieldType::Int => raw
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid()),
            FieldType::Bool => raw
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| invalid()),
        }
    }
}

pub type Schema = BTreeMap<String, FieldSchema>;
