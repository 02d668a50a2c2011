//! Servicio de contraseñas
//!
//! Hash y verificación con bcrypt. El salt va embebido en el digest, así
//! que dos hashes de la misma contraseña nunca coinciden.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::errors::{AppError, AppResult};

/// Generar el hash bcrypt de una contraseña en claro
pub fn hash_password(plain: &str) -> AppResult<String> {
    hash(plain, DEFAULT_COST).map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))
}

/// Verificar una contraseña contra su digest. Una contraseña incorrecta
/// devuelve `Ok(false)`; solo un digest malformado produce error.
pub fn verify_password(plain: &str, digest: &str) -> AppResult<bool> {
    verify(plain, digest).map_err(|e| AppError::Hash(format!("Error verificando hash: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verificar_contrasena_correcta() {
        let digest = hash_password("secreto123").unwrap();
        assert!(verify_password("secreto123", &digest).unwrap());
    }

    #[test]
    fn test_rechazar_contrasena_incorrecta() {
        let digest = hash_password("secreto123").unwrap();
        assert!(!verify_password("otra_cosa", &digest).unwrap());
    }

    #[test]
    fn test_cada_hash_lleva_su_propio_salt() {
        let a = hash_password("secreto123").unwrap();
        let b = hash_password("secreto123").unwrap();
        assert_ne!(a, b);
    }
}
