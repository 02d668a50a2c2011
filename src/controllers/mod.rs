//! Controllers: validación y orquestación entre DTOs y repositorios

pub mod auth_controller;
pub mod conductor_controller;
pub mod ruta_controller;
pub mod trayecto_controller;
pub mod usuario_controller;
pub mod vehiculo_controller;
