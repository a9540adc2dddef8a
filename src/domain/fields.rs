use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::UnknownField;

// The inputs the registration form collects, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationField {
    Username,
    FirstName,
    LastName,
    Email,
    Password,
    PasswordConfirmation,
}

impl RegistrationField {
    pub const ALL: [RegistrationField; 6] = [
        RegistrationField::Username,
        RegistrationField::FirstName,
        RegistrationField::LastName,
        RegistrationField::Email,
        RegistrationField::Password,
        RegistrationField::PasswordConfirmation,
    ];

    // Wire name used in request bodies and error maps.
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationField::Username => "username",
            RegistrationField::FirstName => "first_name",
            RegistrationField::LastName => "last_name",
            RegistrationField::Email => "email",
            RegistrationField::Password => "password",
            RegistrationField::PasswordConfirmation => "password_confirmation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegistrationField::Username => "Username",
            RegistrationField::FirstName => "First name",
            RegistrationField::LastName => "Last name",
            RegistrationField::Email => "Email",
            RegistrationField::Password => "Password",
            RegistrationField::PasswordConfirmation => "Password confirmation",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            RegistrationField::Email => "email",
            RegistrationField::Password | RegistrationField::PasswordConfirmation => "password",
            _ => "text",
        }
    }

    pub fn is_secret(self) -> bool {
        self.input_type() == "password"
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RegistrationField::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| UnknownField(value.to_string()))
    }
}
