//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request de login: formulario username + password, donde el username
/// es el email del principal
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

/// Response de login exitoso
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// "empresa" o "usuario"
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
