//! Registro de bases de datos por empresa
//!
//! Cada empresa tiene su propia base SQLite en disco; la separación física
//! garantiza que ninguna consulta pueda cruzar de una empresa a otra sin
//! resolver primero un handle distinto. El registro abre cada base en el
//! primer `resolve`, cachea el pool y lo cierra explícitamente al apagar
//! el proceso.

use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::database::connection::create_pool;
use crate::utils::errors::{AppError, AppResult};

/// Deriva el identificador de la base de una empresa a partir de su email:
/// parte local en minúsculas, todo lo que no sea `[a-z0-9]` se reemplaza
/// por `_`. El resultado nunca contiene separadores de ruta.
pub fn tenant_store_id(email: &str) -> String {
    let local_part = email.split('@').next().unwrap_or(email);
    local_part
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[derive(Clone)]
pub struct TenantStoreRegistry {
    data_dir: PathBuf,
    pools: Arc<RwLock<HashMap<String, SqlitePool>>>,
}

impl TenantStoreRegistry {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            pools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Ruta en disco de la base de una empresa
    fn store_path(&self, store_id: &str) -> PathBuf {
        self.data_dir.join(format!("empresa_{}.db", store_id))
    }

    /// Resolver el pool de la empresa, abriéndolo y provisionando el schema
    /// en el primer acceso
    pub async fn resolve(&self, email: &str) -> AppResult<SqlitePool> {
        let store_id = tenant_store_id(email);

        {
            let pools = self.pools.read().await;
            if let Some(pool) = pools.get(&store_id) {
                return Ok(pool.clone());
            }
        }

        let mut pools = self.pools.write().await;
        // Otro request pudo habernos ganado el write lock
        if let Some(pool) = pools.get(&store_id) {
            return Ok(pool.clone());
        }

        let path = self.store_path(&store_id);
        let pool = create_pool(&path).await.map_err(|e| {
            AppError::Internal(format!(
                "Error al abrir la base de datos de la empresa '{}': {}",
                store_id, e
            ))
        })?;

        init_tenant_schema(&pool).await.map_err(|e| {
            AppError::Internal(format!(
                "Error al provisionar el schema de la empresa '{}': {}",
                store_id, e
            ))
        })?;

        info!("Base de empresa abierta: {}", path.display());
        pools.insert(store_id, pool.clone());
        Ok(pool)
    }

    /// Provisionar la base de una empresa en el momento del registro.
    /// Idempotente: si la base ya existe solo reabre el schema.
    pub async fn initialize(&self, email: &str) -> AppResult<()> {
        self.resolve(email).await.map(|_| ())
    }

    /// Cerrar todos los pools cacheados; se invoca al apagar el servidor
    pub async fn close_all(&self) {
        let mut pools = self.pools.write().await;
        for (store_id, pool) in pools.drain() {
            info!("Cerrando base de empresa '{}'", store_id);
            pool.close().await;
        }
    }
}

/// Schema de la base por empresa (idempotente)
async fn init_tenant_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS conductores (
            id         TEXT PRIMARY KEY,
            nombre     TEXT NOT NULL,
            cedula     TEXT NOT NULL UNIQUE,
            licencia   TEXT NOT NULL,
            telefono   TEXT NOT NULL,
            estado     TEXT NOT NULL,
            empresa_id INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehiculos (
            id                  TEXT PRIMARY KEY,
            marca               TEXT NOT NULL,
            placa               TEXT NOT NULL UNIQUE,
            modelo              TEXT NOT NULL,
            lateral             TEXT NOT NULL,
            anio_fabricacion    INTEGER NOT NULL,
            capacidad_pasajeros INTEGER NOT NULL,
            estado_operativo    TEXT NOT NULL,
            empresa_id          INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rutas (
            id                TEXT PRIMARY KEY,
            nombre            TEXT NOT NULL,
            codigo            TEXT NOT NULL UNIQUE,
            origen            TEXT NOT NULL,
            destino           TEXT NOT NULL,
            duracion_estimada INTEGER NOT NULL,
            empresa_id        INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trayectos (
            id                  TEXT PRIMARY KEY,
            fecha               DATE NOT NULL,
            hora_salida         TIME NOT NULL,
            hora_llegada        TIME NOT NULL,
            cantidad_pasajeros  INTEGER NOT NULL,
            kilometraje         INTEGER NOT NULL,
            observaciones       TEXT,
            ruta_id             TEXT,
            conductor_id        TEXT,
            vehiculo_id         TEXT,
            empresa_id          INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_store_id_sanitiza_la_parte_local() {
        assert_eq!(tenant_store_id("A.b-C@x.com"), "a_b_c");
        assert_eq!(tenant_store_id("flota2024@transporte.co"), "flota2024");
        assert_eq!(tenant_store_id("../../etc@evil.com"), "_______etc");
        assert_eq!(tenant_store_id("sin-arroba"), "sin_arroba");
    }

    #[tokio::test]
    async fn test_resolve_crea_y_cachea_el_pool() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TenantStoreRegistry::new(dir.path());

        let pool = registry.resolve("gerencia@flota.com").await.unwrap();
        assert!(dir.path().join("empresa_gerencia.db").exists());

        // Segundo resolve devuelve el mismo pool cacheado
        let again = registry.resolve("gerencia@flota.com").await.unwrap();
        assert_eq!(pool.size(), again.size());

        // El schema quedó provisionado
        sqlx::query("SELECT COUNT(*) FROM vehiculos")
            .fetch_one(&pool)
            .await
            .unwrap();

        registry.close_all().await;
    }

    #[tokio::test]
    async fn test_emails_distintos_resuelven_bases_distintas() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TenantStoreRegistry::new(dir.path());

        registry.resolve("norte@x.com").await.unwrap();
        registry.resolve("sur@x.com").await.unwrap();

        assert!(dir.path().join("empresa_norte.db").exists());
        assert!(dir.path().join("empresa_sur.db").exists());

        registry.close_all().await;
    }
}
