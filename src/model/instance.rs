use indexmap::IndexMap;
use serde::Serialize;

use super::Value;
use crate::error::{Error, Result};

/// A constructed object. Fields are ordered inherited-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl Instance {
    pub(super) fn new(type_name: impl Into<String>, fields: IndexMap<String, Value>) -> Self {
        Self { type_name: type_name.into(), fields }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Result<&Value> {
        self.fields.get(field).ok_or_else(|| Error::MissingField {
            type_name: self.type_name.clone(),
            field: field.to_string(),
        })
    }

    pub(super) fn into_fields(self) -> IndexMap<String, Value> {
        self.fields
    }
}
