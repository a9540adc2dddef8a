use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::fields::RegistrationField;

// Current input values, one entry per known field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegistrationPayload {
    values: BTreeMap<RegistrationField, String>,
}

impl Default for RegistrationPayload {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationPayload {
    pub fn new() -> Self {
        Self {
            values: RegistrationField::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        }
    }

    pub fn set(&mut self, field: RegistrationField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: RegistrationField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

// A single rejection reason attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    pub code: Option<String>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

// Per-field messages from a rejected submission. Keys are always known fields;
// a field with no entry has no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: BTreeMap<RegistrationField, Vec<FieldError>>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Empty message lists are not recorded.
    pub fn insert(&mut self, field: RegistrationField, messages: Vec<FieldError>) {
        if messages.is_empty() {
            return;
        }
        self.errors.entry(field).or_default().extend(messages);
    }

    pub fn messages(&self, field: RegistrationField) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, field: RegistrationField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn clear_field(&mut self, field: RegistrationField) -> bool {
        self.errors.remove(&field).is_some()
    }

    // Number of fields carrying at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &[FieldError])> {
        self.errors
            .iter()
            .map(|(field, messages)| (*field, messages.as_slice()))
    }
}
