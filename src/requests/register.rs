use crate::models::account::AccountError;
use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Fields that are never echoed back to the client.
const SECRET_FIELDS: [&str; 2] = ["password", "password_confirmation"];

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "role_text")]
    pub role: String,
    #[serde(flatten)]
    pub data: RegistrationData,
}

/// Raw form fields of a registration, minus the role selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationData(Map<String, Value>);

impl RegistrationData {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(Value::as_str)
    }

    /// Deserialize the fields into a role-specific payload.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }

    /// The submitted input as it should be sent back for form repopulation.
    pub fn for_redisplay(&self, role: &str) -> Map<String, Value> {
        let mut fields = self.0.clone();
        for secret in SECRET_FIELDS {
            fields.remove(secret);
        }
        fields.insert("role".to_string(), Value::String(role.to_string()));
        fields
    }
}

impl From<Map<String, Value>> for RegistrationData {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountFields {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

impl AccountFields {
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.name.trim().is_empty() {
            return Err(AccountError::Validation("The name field is required".to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(AccountError::Validation(
                "The email must be a valid email address".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::Validation(format!(
                "The password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if let Some(confirmation) = &self.password_confirmation {
            if confirmation != &self.password {
                return Err(AccountError::Validation(
                    "The password confirmation does not match".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    pub fn trimmed_name(&self) -> String {
        self.name.trim().to_string()
    }
}

/// A role-specific registration form.
pub trait RegistrationPayload: DeserializeOwned {
    fn account(&self) -> &AccountFields;

    fn validate(&self) -> Result<(), AccountError> {
        self.account().validate()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentPayload {
    #[serde(flatten)]
    pub account: AccountFields,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub grade_level: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub parent_email: Option<String>,
}

impl RegistrationPayload for StudentPayload {
    fn account(&self) -> &AccountFields {
        &self.account
    }

    fn validate(&self) -> Result<(), AccountError> {
        self.account.validate()?;
        if let Some(parent_email) = &self.parent_email {
            if !is_valid_email(parent_email) {
                return Err(AccountError::Validation(
                    "The parent email must be a valid email address".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentPayload {
    #[serde(flatten)]
    pub account: AccountFields,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub occupation: Option<String>,
}

impl RegistrationPayload for ParentPayload {
    fn account(&self) -> &AccountFields {
        &self.account
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstructorPayload {
    #[serde(flatten)]
    pub account: AccountFields,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub specialization: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub qualification: Option<String>,
}

impl RegistrationPayload for InstructorPayload {
    fn account(&self) -> &AccountFields {
        &self.account
    }
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

// Non-string roles are kept as their JSON text so they fail role parsing
// like any other unknown value.
fn role_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(role)) => role,
        Some(other) => other.to_string(),
    })
}

// Forms submit untouched optional inputs as empty strings.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
