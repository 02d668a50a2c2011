//! DTOs de empresa y respuesta genérica de la API

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::empresa::Empresa;

/// Request para registrar una empresa
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterEmpresaRequest {
    #[validate(length(min = 2, max = 255))]
    pub nombre: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 5, max = 20))]
    pub nit: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

/// Response de empresa (sin password)
#[derive(Debug, Serialize)]
pub struct EmpresaResponse {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub nit: String,
}

impl From<Empresa> for EmpresaResponse {
    fn from(empresa: Empresa) -> Self {
        Self {
            id: empresa.id,
            nombre: empresa.nombre,
            email: empresa.email,
            nit: empresa.nit,
        }
    }
}

/// Response genérica para mutaciones
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}
