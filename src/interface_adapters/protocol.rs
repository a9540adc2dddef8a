use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{FieldError, RegistrationField, ValidationErrorSet};

// Body of a 2xx registration response, or of any endpoint replying with a
// single human-readable string. Older backends used `message` instead of `detail`.
#[derive(Debug, Default, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DetailResponse {
    pub fn text(self) -> Option<String> {
        self.detail.or(self.message)
    }
}

pub type FieldErrorMap = BTreeMap<String, Vec<ErrorDescriptor>>;

// Body of a 4xx registration response. Either `{"detail": {"<field>": [<descriptor>, ...]}}`
// or the bare field map a serializer returns.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrorBody {
    Envelope { detail: FieldErrorMap },
    Bare(FieldErrorMap),
}

// One entry in a field's error list. Plain strings and `{string, code}` objects are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDescriptor {
    Message(String),
    Coded {
        string: String,
        #[serde(default)]
        code: Option<String>,
    },
}

impl From<ErrorDescriptor> for FieldError {
    fn from(descriptor: ErrorDescriptor) -> Self {
        match descriptor {
            ErrorDescriptor::Message(message) => FieldError::new(message),
            ErrorDescriptor::Coded { string, code } => FieldError {
                message: string,
                code,
            },
        }
    }
}

impl ValidationErrorBody {
    // Keys outside the six known fields are dropped.
    pub fn into_error_set(self) -> ValidationErrorSet {
        let fields = match self {
            ValidationErrorBody::Envelope { detail } => detail,
            ValidationErrorBody::Bare(fields) => fields,
        };
        let mut errors = ValidationErrorSet::new();
        for (key, descriptors) in fields {
            match key.parse::<RegistrationField>() {
                Ok(field) => {
                    errors.insert(field, descriptors.into_iter().map(FieldError::from).collect())
                }
                Err(err) => tracing::warn!(error = %err, "dropping error for unknown field."),
            }
        }
        errors
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// Simple error envelope for JSON responses produced by the dev server itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
