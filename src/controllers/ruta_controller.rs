//! Controller de rutas

use uuid::Uuid;
use validator::Validate;

use crate::dto::empresa_dto::ApiResponse;
use crate::dto::ruta_dto::{CreateRutaRequest, RutaResponse, UpdateRutaRequest};
use crate::models::ruta::Ruta;
use crate::repositories::ruta_repository::RutaRepository;
use crate::utils::errors::{AppError, AppResult};
use sqlx::SqlitePool;

pub struct RutaController {
    repository: RutaRepository,
}

impl RutaController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: RutaRepository::new(pool),
        }
    }

    /// Alta en lote: el endpoint recibe una lista y la inserta completa o
    /// no inserta nada
    pub async fn create_many(
        &self,
        empresa_id: i64,
        requests: Vec<CreateRutaRequest>,
    ) -> AppResult<ApiResponse<Vec<RutaResponse>>> {
        for request in &requests {
            request.validate()?;
        }

        let rutas = requests
            .into_iter()
            .map(|request| Ruta {
                id: Uuid::new_v4().to_string(),
                nombre: request.nombre,
                codigo: request.codigo,
                origen: request.origen,
                destino: request.destino,
                duracion_estimada: request.duracion_estimada,
                empresa_id,
            })
            .collect();

        let creadas = self.repository.create_many(rutas).await?;

        Ok(ApiResponse::success_with_message(
            creadas.into_iter().map(RutaResponse::from).collect(),
            "Rutas creadas exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<RutaResponse>> {
        let rutas = self.repository.list(empresa_id).await?;
        Ok(rutas.into_iter().map(RutaResponse::from).collect())
    }

    pub async fn get_by_codigo(&self, empresa_id: i64, codigo: &str) -> AppResult<RutaResponse> {
        let ruta = self
            .repository
            .find_by_codigo(codigo, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada.".to_string()))?;

        Ok(RutaResponse::from(ruta))
    }

    pub async fn update(
        &self,
        empresa_id: i64,
        id: &str,
        request: UpdateRutaRequest,
    ) -> AppResult<ApiResponse<RutaResponse>> {
        request.validate()?;

        let ruta = self
            .repository
            .update(
                id,
                empresa_id,
                request.nombre,
                request.codigo,
                request.origen,
                request.destino,
                request.duracion_estimada,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            RutaResponse::from(ruta),
            "Ruta actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, empresa_id: i64, id: &str) -> AppResult<()> {
        self.repository.delete(id, empresa_id).await
    }
}
