//! Repositorio de rutas (base por empresa)

use sqlx::SqlitePool;

use crate::models::ruta::Ruta;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct RutaRepository {
    pool: SqlitePool,
}

impl RutaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Alta en lote dentro de una transacción: un código duplicado
    /// revierte el lote completo
    pub async fn create_many(&self, rutas: Vec<Ruta>) -> AppResult<Vec<Ruta>> {
        let mut tx = self.pool.begin().await?;

        for ruta in &rutas {
            sqlx::query(
                r#"
                INSERT INTO rutas (id, nombre, codigo, origen, destino, duracion_estimada, empresa_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&ruta.id)
            .bind(&ruta.nombre)
            .bind(&ruta.codigo)
            .bind(&ruta.origen)
            .bind(&ruta.destino)
            .bind(ruta.duracion_estimada)
            .bind(ruta.empresa_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Error: Código de ruta duplicado.".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
        }

        tx.commit().await?;
        Ok(rutas)
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<Ruta>> {
        let rutas = sqlx::query_as::<_, Ruta>(
            "SELECT * FROM rutas WHERE empresa_id = ?1 ORDER BY codigo",
        )
        .bind(empresa_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rutas)
    }

    pub async fn find_by_id(&self, id: &str, empresa_id: i64) -> AppResult<Option<Ruta>> {
        let ruta = sqlx::query_as::<_, Ruta>(
            "SELECT * FROM rutas WHERE id = ?1 AND empresa_id = ?2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ruta)
    }

    pub async fn find_by_codigo(&self, codigo: &str, empresa_id: i64) -> AppResult<Option<Ruta>> {
        let ruta = sqlx::query_as::<_, Ruta>(
            "SELECT * FROM rutas WHERE codigo = ?1 AND empresa_id = ?2",
        )
        .bind(codigo)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ruta)
    }

    /// Actualización parcial: los campos en `None` conservan su valor
    pub async fn update(
        &self,
        id: &str,
        empresa_id: i64,
        nombre: Option<String>,
        codigo: Option<String>,
        origen: Option<String>,
        destino: Option<String>,
        duracion_estimada: Option<i64>,
    ) -> AppResult<Ruta> {
        let current = self
            .find_by_id(id, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada.".to_string()))?;

        let ruta = sqlx::query_as::<_, Ruta>(
            r#"
            UPDATE rutas
            SET nombre = ?3, codigo = ?4, origen = ?5, destino = ?6, duracion_estimada = ?7
            WHERE id = ?1 AND empresa_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(empresa_id)
        .bind(nombre.unwrap_or(current.nombre))
        .bind(codigo.unwrap_or(current.codigo))
        .bind(origen.unwrap_or(current.origen))
        .bind(destino.unwrap_or(current.destino))
        .bind(duracion_estimada.unwrap_or(current.duracion_estimada))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Error: Código de ruta duplicado.".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(ruta)
    }

    pub async fn delete(&self, id: &str, empresa_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM rutas WHERE id = ?1 AND empresa_id = ?2")
            .bind(id)
            .bind(empresa_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ruta no encontrada.".to_string()));
        }

        Ok(())
    }
}
