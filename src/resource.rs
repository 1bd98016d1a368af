use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-resource state handed to every lifecycle call.
///
/// An unset identifier means the resource is absent: the host drops it from
/// Terraform state after the call returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending state for a create: attributes are known, the identifier is not.
    pub fn from_state<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            id: None,
            attributes: attributes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Stored state for a read or delete: only the identifier is known.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            attributes: BTreeMap::new(),
        }
    }

    /// Returns the identifier, or `""` when unset.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn is_removed(&self) -> bool {
        self.id.is_none()
    }

    /// Drops the identifier and every attribute.
    pub fn mark_removed(&mut self) {
        self.id = None;
        self.attributes.clear();
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Renders an attribute as a string. Missing and null values are empty.
    pub fn get_string(&self, key: &str) -> String {
        match self.attributes.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }
}

/// Renders a Terraform `import` block for an existing object.
pub fn generate_import(to: &str, id: &str) -> String {
    format!(
        "import {{\n  to = {}\n  id = \"{}\"\n}}",
        to,
        id.replace('"', "\\\"")
    )
}
