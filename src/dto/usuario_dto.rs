//! DTOs de usuario

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usuario::Usuario;

fn validate_rol(rol: &str) -> Result<(), validator::ValidationError> {
    if crate::models::usuario::RolUsuario::from_str(rol).is_none() {
        return Err(validator::ValidationError::new("rol"));
    }
    Ok(())
}

/// Request para crear un usuario de la empresa
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsuarioRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[validate(custom = "validate_rol")]
    pub rol: String,
}

/// Request de actualización parcial
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsuarioRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,

    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,

    #[validate(custom = "validate_rol")]
    pub rol: Option<String>,

    pub activo: Option<bool>,
}

/// Response de usuario (sin password)
#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub rol: String,
    pub activo: bool,
    pub empresa_id: i64,
}

impl From<Usuario> for UsuarioResponse {
    fn from(usuario: Usuario) -> Self {
        Self {
            id: usuario.id,
            email: usuario.email,
            username: usuario.username,
            rol: usuario.rol,
            activo: usuario.activo,
            empresa_id: usuario.empresa_id,
        }
    }
}
