//! Capa de acceso a datos
//!
//! `connection` maneja la base principal; `tenant_registry` resuelve la
//! base aislada de cada empresa.

pub mod connection;
pub mod tenant_registry;

pub use tenant_registry::TenantStoreRegistry;
