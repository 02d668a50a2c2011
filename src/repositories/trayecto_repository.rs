//! Repositorio de trayectos (base por empresa)

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::trayecto::Trayecto;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct TrayectoRepository {
    pool: SqlitePool,
}

impl TrayectoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trayecto: Trayecto) -> AppResult<Trayecto> {
        sqlx::query(
            r#"
            INSERT INTO trayectos
                (id, fecha, hora_salida, hora_llegada, cantidad_pasajeros,
                 kilometraje, observaciones, ruta_id, conductor_id, vehiculo_id, empresa_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&trayecto.id)
        .bind(trayecto.fecha)
        .bind(trayecto.hora_salida)
        .bind(trayecto.hora_llegada)
        .bind(trayecto.cantidad_pasajeros)
        .bind(trayecto.kilometraje)
        .bind(&trayecto.observaciones)
        .bind(&trayecto.ruta_id)
        .bind(&trayecto.conductor_id)
        .bind(&trayecto.vehiculo_id)
        .bind(trayecto.empresa_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Error: Trayecto duplicado.".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(trayecto)
    }

    /// Importación masiva: todas las filas entran en una transacción y
    /// cualquier violación de integridad revierte el lote completo
    pub async fn create_many(&self, trayectos: Vec<Trayecto>) -> AppResult<Vec<Trayecto>> {
        let mut tx = self.pool.begin().await?;

        for trayecto in &trayectos {
            sqlx::query(
                r#"
                INSERT INTO trayectos
                    (id, fecha, hora_salida, hora_llegada, cantidad_pasajeros,
                     kilometraje, observaciones, ruta_id, conductor_id, vehiculo_id, empresa_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
            )
            .bind(&trayecto.id)
            .bind(trayecto.fecha)
            .bind(trayecto.hora_salida)
            .bind(trayecto.hora_llegada)
            .bind(trayecto.cantidad_pasajeros)
            .bind(trayecto.kilometraje)
            .bind(&trayecto.observaciones)
            .bind(&trayecto.ruta_id)
            .bind(&trayecto.conductor_id)
            .bind(&trayecto.vehiculo_id)
            .bind(trayecto.empresa_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Error: Trayecto duplicado.".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
        }

        tx.commit().await?;
        Ok(trayectos)
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<Trayecto>> {
        let trayectos = sqlx::query_as::<_, Trayecto>(
            "SELECT * FROM trayectos WHERE empresa_id = ?1 ORDER BY fecha, hora_salida",
        )
        .bind(empresa_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trayectos)
    }

    /// Trayectos desde la fecha dada en adelante, ordenados por fecha y
    /// hora de salida
    pub async fn list_activos(&self, empresa_id: i64, desde: NaiveDate) -> AppResult<Vec<Trayecto>> {
        let trayectos = sqlx::query_as::<_, Trayecto>(
            r#"
            SELECT * FROM trayectos
            WHERE empresa_id = ?1 AND fecha >= ?2
            ORDER BY fecha, hora_salida
            "#,
        )
        .bind(empresa_id)
        .bind(desde)
        .fetch_all(&self.pool)
        .await?;

        Ok(trayectos)
    }

    pub async fn find_by_id(&self, id: &str, empresa_id: i64) -> AppResult<Option<Trayecto>> {
        let trayecto = sqlx::query_as::<_, Trayecto>(
            "SELECT * FROM trayectos WHERE id = ?1 AND empresa_id = ?2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trayecto)
    }

    /// Candidatos a conflicto de agenda: misma fecha y mismo conductor o
    /// vehículo. El cruce de horarios se evalúa en `Trayecto::se_solapa_con`.
    pub async fn find_candidatos_solape(
        &self,
        empresa_id: i64,
        fecha: NaiveDate,
        conductor_id: Option<&str>,
        vehiculo_id: Option<&str>,
    ) -> AppResult<Vec<Trayecto>> {
        let trayectos = sqlx::query_as::<_, Trayecto>(
            r#"
            SELECT * FROM trayectos
            WHERE empresa_id = ?1 AND fecha = ?2
              AND ((?3 IS NOT NULL AND conductor_id = ?3)
                OR (?4 IS NOT NULL AND vehiculo_id = ?4))
            "#,
        )
        .bind(empresa_id)
        .bind(fecha)
        .bind(conductor_id)
        .bind(vehiculo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trayectos)
    }

    /// Actualización parcial: los campos escalares en `None` conservan su
    /// valor; las referencias opcionales no se tocan
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: &str,
        empresa_id: i64,
        fecha: Option<NaiveDate>,
        hora_salida: Option<chrono::NaiveTime>,
        hora_llegada: Option<chrono::NaiveTime>,
        cantidad_pasajeros: Option<i64>,
        kilometraje: Option<i64>,
        observaciones: Option<String>,
    ) -> AppResult<Trayecto> {
        let current = self
            .find_by_id(id, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trayecto no encontrado.".to_string()))?;

        let trayecto = sqlx::query_as::<_, Trayecto>(
            r#"
            UPDATE trayectos
            SET fecha = ?3, hora_salida = ?4, hora_llegada = ?5,
                cantidad_pasajeros = ?6, kilometraje = ?7, observaciones = ?8
            WHERE id = ?1 AND empresa_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(empresa_id)
        .bind(fecha.unwrap_or(current.fecha))
        .bind(hora_salida.unwrap_or(current.hora_salida))
        .bind(hora_llegada.unwrap_or(current.hora_llegada))
        .bind(cantidad_pasajeros.unwrap_or(current.cantidad_pasajeros))
        .bind(kilometraje.unwrap_or(current.kilometraje))
        .bind(observaciones.or(current.observaciones))
        .fetch_one(&self.pool)
        .await?;

        Ok(trayecto)
    }

    pub async fn delete(&self, id: &str, empresa_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM trayectos WHERE id = ?1 AND empresa_id = ?2")
            .bind(id)
            .bind(empresa_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Trayecto no encontrado.".to_string()));
        }

        Ok(())
    }
}
