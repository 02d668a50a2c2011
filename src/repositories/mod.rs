//! Repositorios: todo el SQL del sistema
//!
//! Los repositorios del directorio global reciben el pool principal; los
//! de flota reciben el pool con alcance de empresa que resuelve el
//! middleware de autenticación.

pub mod conductor_repository;
pub mod empresa_repository;
pub mod ruta_repository;
pub mod trayecto_repository;
pub mod usuario_repository;
pub mod vehiculo_repository;
