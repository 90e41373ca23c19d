//! User accounts.
//!
//! The `id` is an opaque string (UUID v4 for accounts created here, any
//! non-empty string for imported data). Visibility of every other collection
//! is decided by [`Role`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Role of an account. Admins see and manage everything; regular users only
/// their own rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl TryFrom<&str> for Role {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(EngineError::InvalidInput(format!("invalid role: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Basic-auth secret. Absent in older exports, hence the default.
    #[serde(default)]
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(name: String, email: String, password: String, role: Role) -> ResultEngine<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "user name must not be empty".to_string(),
            ));
        }
        let email = email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(EngineError::InvalidInput(format!(
                "invalid email: {email}"
            )));
        }
        if password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password,
            role,
        })
    }
}
