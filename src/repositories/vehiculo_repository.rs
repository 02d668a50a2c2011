//! Repositorio de vehículos (base por empresa)

use sqlx::SqlitePool;

use crate::models::vehiculo::Vehiculo;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct VehiculoRepository {
    pool: SqlitePool,
}

impl VehiculoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Alta en lote dentro de una transacción: una placa duplicada
    /// revierte el lote completo
    pub async fn create_many(&self, vehiculos: Vec<Vehiculo>) -> AppResult<Vec<Vehiculo>> {
        let mut tx = self.pool.begin().await?;

        for vehiculo in &vehiculos {
            sqlx::query(
                r#"
                INSERT INTO vehiculos
                    (id, marca, placa, modelo, lateral, anio_fabricacion,
                     capacidad_pasajeros, estado_operativo, empresa_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&vehiculo.id)
            .bind(&vehiculo.marca)
            .bind(&vehiculo.placa)
            .bind(&vehiculo.modelo)
            .bind(&vehiculo.lateral)
            .bind(vehiculo.anio_fabricacion)
            .bind(vehiculo.capacidad_pasajeros)
            .bind(&vehiculo.estado_operativo)
            .bind(vehiculo.empresa_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Error: Placa duplicada.".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
        }

        tx.commit().await?;
        Ok(vehiculos)
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<Vehiculo>> {
        let vehiculos = sqlx::query_as::<_, Vehiculo>(
            "SELECT * FROM vehiculos WHERE empresa_id = ?1 ORDER BY placa",
        )
        .bind(empresa_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehiculos)
    }

    pub async fn find_by_id(&self, id: &str, empresa_id: i64) -> AppResult<Option<Vehiculo>> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            "SELECT * FROM vehiculos WHERE id = ?1 AND empresa_id = ?2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehiculo)
    }

    pub async fn find_by_placa(
        &self,
        placa: &str,
        empresa_id: i64,
    ) -> AppResult<Option<Vehiculo>> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            "SELECT * FROM vehiculos WHERE placa = ?1 AND empresa_id = ?2",
        )
        .bind(placa)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehiculo)
    }

    /// Actualización parcial: los campos en `None` conservan su valor
    pub async fn update(
        &self,
        id: &str,
        empresa_id: i64,
        marca: Option<String>,
        placa: Option<String>,
        modelo: Option<String>,
        lateral: Option<String>,
        anio_fabricacion: Option<i64>,
        capacidad_pasajeros: Option<i64>,
        estado_operativo: Option<String>,
    ) -> AppResult<Vehiculo> {
        let current = self
            .find_by_id(id, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado.".to_string()))?;

        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            r#"
            UPDATE vehiculos
            SET marca = ?3, placa = ?4, modelo = ?5, lateral = ?6,
                anio_fabricacion = ?7, capacidad_pasajeros = ?8, estado_operativo = ?9
            WHERE id = ?1 AND empresa_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(empresa_id)
        .bind(marca.unwrap_or(current.marca))
        .bind(placa.unwrap_or(current.placa))
        .bind(modelo.unwrap_or(current.modelo))
        .bind(lateral.unwrap_or(current.lateral))
        .bind(anio_fabricacion.unwrap_or(current.anio_fabricacion))
        .bind(capacidad_pasajeros.unwrap_or(current.capacidad_pasajeros))
        .bind(estado_operativo.unwrap_or(current.estado_operativo))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Error: Placa duplicada.".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(vehiculo)
    }

    pub async fn delete(&self, id: &str, empresa_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehiculos WHERE id = ?1 AND empresa_id = ?2")
            .bind(id)
            .bind(empresa_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado.".to_string()));
        }

        Ok(())
    }
}
