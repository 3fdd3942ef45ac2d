/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/auth` endpoints.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::gateway::Registration;

fn default_active() -> bool {
    true
}

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Plain password; hashed before storage
    pub password: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub admin: bool,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            name: request.name,
            email: request.email,
            password: request.password,
            active: request.active,
            admin: request.admin,
        }
    }
}

/// JSON login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Form login request
///
/// `username` carries the email address.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Plain message response
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Greeting returned by `GET /auth/`
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthHomeResponse {
    pub message: String,
    pub authenticated: bool,
}

/// Tokens issued at login
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// A single access token
#[derive(Serialize, Deserialize, Debug)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Token type reported with every issued token
pub const TOKEN_TYPE: &str = "Bearer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_defaults() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"name":"A","email":"a@x.com","password":"p"}"#).unwrap();

        assert!(request.active);
        assert!(!request.admin);
    }

    #[test]
    fn test_register_request_explicit_flags() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@x.com","password":"p","active":false,"admin":true}"#,
        )
        .unwrap();

        let registration = Registration::from(request);
        assert!(!registration.active);
        assert!(registration.admin);
    }
}
