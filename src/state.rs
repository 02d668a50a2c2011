//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: el pool del directorio global, la
//! configuración, el servicio JWT y el registro de bases por empresa.

use sqlx::SqlitePool;

use crate::config::environment::EnvironmentConfig;
use crate::database::TenantStoreRegistry;
use crate::services::jwt_service::JwtService;

#[derive(Clone)]
pub struct AppState {
    /// Directorio global: empresas y usuarios
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    pub jwt: JwtService,
    /// Bases aisladas por empresa, abiertas bajo demanda
    pub tenants: TenantStoreRegistry,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig) -> Self {
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_minutes);
        let tenants = TenantStoreRegistry::new(config.data_dir.clone());
        Self {
            pool,
            config,
            jwt,
            tenants,
        }
    }

    /// Cerrar todos los pools al apagar el servidor
    pub async fn shutdown(&self) {
        self.tenants.close_all().await;
        self.pool.close().await;
    }
}
