//! Repositorio de conductores (base por empresa)
//!
//! Todas las consultas entran por el pool con alcance de empresa y además
//! filtran por `empresa_id`.

use sqlx::SqlitePool;

use crate::models::conductor::Conductor;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct ConductorRepository {
    pool: SqlitePool,
}

impl ConductorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Alta en lote dentro de una transacción: una cédula duplicada
    /// revierte el lote completo
    pub async fn create_many(&self, conductores: Vec<Conductor>) -> AppResult<Vec<Conductor>> {
        let mut tx = self.pool.begin().await?;

        for conductor in &conductores {
            sqlx::query(
                r#"
                INSERT INTO conductores (id, nombre, cedula, licencia, telefono, estado, empresa_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&conductor.id)
            .bind(&conductor.nombre)
            .bind(&conductor.cedula)
            .bind(&conductor.licencia)
            .bind(&conductor.telefono)
            .bind(&conductor.estado)
            .bind(conductor.empresa_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Error: Cédula duplicada.".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
        }

        tx.commit().await?;
        Ok(conductores)
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<Conductor>> {
        let conductores = sqlx::query_as::<_, Conductor>(
            "SELECT * FROM conductores WHERE empresa_id = ?1 ORDER BY nombre",
        )
        .bind(empresa_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(conductores)
    }

    pub async fn find_by_id(&self, id: &str, empresa_id: i64) -> AppResult<Option<Conductor>> {
        let conductor = sqlx::query_as::<_, Conductor>(
            "SELECT * FROM conductores WHERE id = ?1 AND empresa_id = ?2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conductor)
    }

    pub async fn find_by_cedula(
        &self,
        cedula: &str,
        empresa_id: i64,
    ) -> AppResult<Option<Conductor>> {
        let conductor = sqlx::query_as::<_, Conductor>(
            "SELECT * FROM conductores WHERE cedula = ?1 AND empresa_id = ?2",
        )
        .bind(cedula)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conductor)
    }

    /// Actualización parcial: los campos en `None` conservan su valor
    pub async fn update(
        &self,
        id: &str,
        empresa_id: i64,
        nombre: Option<String>,
        cedula: Option<String>,
        licencia: Option<String>,
        telefono: Option<String>,
        estado: Option<String>,
    ) -> AppResult<Conductor> {
        let current = self
            .find_by_id(id, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado.".to_string()))?;

        let conductor = sqlx::query_as::<_, Conductor>(
            r#"
            UPDATE conductores
            SET nombre = ?3, cedula = ?4, licencia = ?5, telefono = ?6, estado = ?7
            WHERE id = ?1 AND empresa_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(empresa_id)
        .bind(nombre.unwrap_or(current.nombre))
        .bind(cedula.unwrap_or(current.cedula))
        .bind(licencia.unwrap_or(current.licencia))
        .bind(telefono.unwrap_or(current.telefono))
        .bind(estado.unwrap_or(current.estado))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Error: Cédula duplicada.".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(conductor)
    }

    pub async fn delete(&self, id: &str, empresa_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM conductores WHERE id = ?1 AND empresa_id = ?2")
            .bind(id)
            .bind(empresa_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Conductor no encontrado.".to_string()));
        }

        Ok(())
    }
}
