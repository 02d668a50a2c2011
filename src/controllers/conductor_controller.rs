//! Controller de conductores

use uuid::Uuid;
use validator::Validate;

use crate::dto::conductor_dto::{
    ConductorResponse, CreateConductorRequest, UpdateConductorRequest,
};
use crate::dto::empresa_dto::ApiResponse;
use crate::models::conductor::Conductor;
use crate::repositories::conductor_repository::ConductorRepository;
use crate::utils::errors::{AppError, AppResult};
use sqlx::SqlitePool;

pub struct ConductorController {
    repository: ConductorRepository,
}

impl ConductorController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: ConductorRepository::new(pool),
        }
    }

    /// Alta en lote: el endpoint recibe una lista y la inserta completa o
    /// no inserta nada
    pub async fn create_many(
        &self,
        empresa_id: i64,
        requests: Vec<CreateConductorRequest>,
    ) -> AppResult<ApiResponse<Vec<ConductorResponse>>> {
        for request in &requests {
            request.validate()?;
        }

        let conductores = requests
            .into_iter()
            .map(|request| Conductor {
                id: Uuid::new_v4().to_string(),
                nombre: request.nombre,
                cedula: request.cedula,
                licencia: request.licencia,
                telefono: request.telefono,
                estado: request.estado,
                empresa_id,
            })
            .collect();

        let creados = self.repository.create_many(conductores).await?;

        Ok(ApiResponse::success_with_message(
            creados.into_iter().map(ConductorResponse::from).collect(),
            "Conductores creados exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<ConductorResponse>> {
        let conductores = self.repository.list(empresa_id).await?;
        Ok(conductores.into_iter().map(ConductorResponse::from).collect())
    }

    pub async fn get_by_cedula(
        &self,
        empresa_id: i64,
        cedula: &str,
    ) -> AppResult<ConductorResponse> {
        let conductor = self
            .repository
            .find_by_cedula(cedula, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado.".to_string()))?;

        Ok(ConductorResponse::from(conductor))
    }

    pub async fn update(
        &self,
        empresa_id: i64,
        id: &str,
        request: UpdateConductorRequest,
    ) -> AppResult<ApiResponse<ConductorResponse>> {
        request.validate()?;

        let conductor = self
            .repository
            .update(
                id,
                empresa_id,
                request.nombre,
                request.cedula,
                request.licencia,
                request.telefono,
                request.estado,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            ConductorResponse::from(conductor),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, empresa_id: i64, id: &str) -> AppResult<()> {
        self.repository.delete(id, empresa_id).await
    }
}
