//! Modelo de Usuario
//!
//! Un usuario pertenece a exactamente una empresa. Se desactiva con el
//! flag `activo`; nunca se elimina físicamente de forma implícita.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Roles disponibles para un usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolUsuario {
    Admin,
    Agente,
}

impl RolUsuario {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolUsuario::Admin => "admin",
            RolUsuario::Agente => "agente",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(RolUsuario::Admin),
            "agente" => Some(RolUsuario::Agente),
            _ => None,
        }
    }
}

/// Usuario registrado en el directorio global
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub rol: String,
    pub activo: bool,
    pub empresa_id: i64,
}

impl Usuario {
    pub fn rol(&self) -> Option<RolUsuario> {
        RolUsuario::from_str(&self.rol)
    }

    pub fn es_admin(&self) -> bool {
        self.rol() == Some(RolUsuario::Admin)
    }
}
