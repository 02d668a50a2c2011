//! Conexión a la base de datos principal
//!
//! La base principal guarda el directorio global de empresas y usuarios;
//! los datos de flota de cada empresa viven en su propia base (ver
//! `tenant_registry`).

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

/// Nombre del archivo de la base principal dentro de `data_dir`
pub const PRIMARY_DB_FILE: &str = "transporte.db";

/// Crear un pool de conexiones SQLite, creando el archivo si no existe
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Abrir la base principal y provisionar su schema
pub async fn create_primary_pool(data_dir: &Path) -> Result<SqlitePool> {
    let pool = create_pool(&data_dir.join(PRIMARY_DB_FILE)).await?;
    init_primary_schema(&pool).await?;
    Ok(pool)
}

/// Schema del directorio global (idempotente)
pub async fn init_primary_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS empresas (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre          TEXT NOT NULL,
            email           TEXT NOT NULL UNIQUE,
            nit             TEXT NOT NULL,
            hashed_password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuarios (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            email           TEXT NOT NULL UNIQUE,
            username        TEXT NOT NULL UNIQUE,
            hashed_password TEXT NOT NULL,
            rol             TEXT NOT NULL DEFAULT 'agente',
            activo          INTEGER NOT NULL DEFAULT 1,
            empresa_id      INTEGER NOT NULL REFERENCES empresas(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
