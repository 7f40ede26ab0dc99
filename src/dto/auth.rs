use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "user_type")]
    pub user_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub userid: i32,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    /// Email address or username.
    pub identifier: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub user_type: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub user_type: String,
    pub iat: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Client,
    Supplier,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Client => "Client",
            UserRole::Supplier => "Supplier",
            UserRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(UserRole::Client),
            "supplier" => Ok(UserRole::Supplier),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown user type `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("supplier".parse::<UserRole>().unwrap(), UserRole::Supplier);
        assert_eq!(" ADMIN ".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("guest".parse::<UserRole>().is_err());
    }

    #[test]
    fn register_body_uses_camel_case() {
        let body: RegisterRequest = serde_json::from_value(serde_json::json!({
            "firstName": "Maria",
            "lastName": "Santos",
            "username": "maria",
            "email": "maria@example.com",
            "contactNumber": "09171234567",
            "password": "s3cret",
            "user_type": "Supplier"
        }))
        .unwrap();
        assert_eq!(body.first_name.as_deref(), Some("Maria"));
        assert_eq!(body.contact_number.as_deref(), Some("09171234567"));
        assert_eq!(body.user_type.as_deref(), Some("Supplier"));
        assert!(body.address.is_none());
    }
}
