//! API models for request and response payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cached profile of the authenticated user
///
/// The profile is kept as the JSON object the backend sent, so it survives a
/// round-trip through storage unchanged whatever fields it carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct User(pub Map<String, Value>);

impl User {
    /// Raw field of the profile
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Identifier, under `id` or `_id`, of any JSON type
    pub fn id(&self) -> Option<&Value> {
        self.get("id").or_else(|| self.get("_id"))
    }

    /// Display name, if it is a string
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&str> {
        self.get("role").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<User> for Value {
    fn from(user: User) -> Self {
        Value::Object(user.0)
    }
}

/// User login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Request for user registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Contact form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Filters recognized by the donor listing
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorFilters {
    pub blood_type: Option<String>,
    pub location: Option<String>,
}

/// Filters recognized by the blood request listing
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilters {
    pub blood_type: Option<String>,
    pub status: Option<String>,
    pub urgency: Option<String>,
    pub location: Option<String>,
    pub limit: Option<u32>,
}

/// Filters recognized by the donation center listing
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterFilters {
    pub city: Option<String>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
}
