//! Servicios del sistema
//!
//! Credenciales, emisión/verificación de tokens y decodificación CSV.

pub mod csv_service;
pub mod jwt_service;
pub mod password_service;
