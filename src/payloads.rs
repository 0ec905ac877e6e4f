use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::AsRefStr;
use validator::Validate;

use crate::util::{random_email, random_password};

#[derive(Debug, Clone, Copy, PartialEq, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Signup,
    Login,
}

/// Body of `POST /api/v1/auth`. The validation attributes mirror the rules
/// the server enforces, so tests can tell a payload's expected verdict
/// without a round trip.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct AuthRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 32))]
    pub password: String,
    pub action: Action,
}

impl AuthRequest {
    pub fn signup(email: String, password: String) -> Self {
        Self {
            email,
            password,
            action: Action::Signup,
        }
    }

    pub fn login(email: String, password: String) -> Self {
        Self {
            email,
            password,
            action: Action::Login,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub email: String,
    pub token: String,
}

/// The email/password pair a scenario run registers with. The conflict case
/// and the login phase must reuse this exact pair, never a fresh one.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn random() -> Self {
        Self {
            email: random_email(),
            password: random_password(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub email: String,
    pub name: String,
    pub user_image_uri: String,
    pub company_name: String,
    pub company_image_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: Value,
    pub name: String,
}

impl Department {
    // the API has returned this id both as a JSON number and as a string
    pub fn id(&self) -> Option<String> {
        match &self.department_id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub identity_number: String,
    pub name: String,
    pub gender: String,
    pub department_id: String,
    pub employee_image_uri: String,
}
