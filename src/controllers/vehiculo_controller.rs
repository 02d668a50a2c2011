//! Controller de vehículos

use uuid::Uuid;
use validator::Validate;

use crate::dto::empresa_dto::ApiResponse;
use crate::dto::vehiculo_dto::{CreateVehiculoRequest, UpdateVehiculoRequest, VehiculoResponse};
use crate::models::vehiculo::Vehiculo;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::utils::errors::{AppError, AppResult};
use sqlx::SqlitePool;

pub struct VehiculoController {
    repository: VehiculoRepository,
}

impl VehiculoController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: VehiculoRepository::new(pool),
        }
    }

    /// Alta en lote: el endpoint recibe una lista y la inserta completa o
    /// no inserta nada
    pub async fn create_many(
        &self,
        empresa_id: i64,
        requests: Vec<CreateVehiculoRequest>,
    ) -> AppResult<ApiResponse<Vec<VehiculoResponse>>> {
        for request in &requests {
            request.validate()?;
        }

        let vehiculos = requests
            .into_iter()
            .map(|request| Vehiculo {
                id: Uuid::new_v4().to_string(),
                marca: request.marca,
                placa: request.placa,
                modelo: request.modelo,
                lateral: request.lateral,
                anio_fabricacion: request.anio_fabricacion,
                capacidad_pasajeros: request.capacidad_pasajeros,
                estado_operativo: request.estado_operativo,
                empresa_id,
            })
            .collect();

        let creados = self.repository.create_many(vehiculos).await?;

        Ok(ApiResponse::success_with_message(
            creados.into_iter().map(VehiculoResponse::from).collect(),
            "Vehículos creados exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<VehiculoResponse>> {
        let vehiculos = self.repository.list(empresa_id).await?;
        Ok(vehiculos.into_iter().map(VehiculoResponse::from).collect())
    }

    pub async fn get_by_placa(&self, empresa_id: i64, placa: &str) -> AppResult<VehiculoResponse> {
        let vehiculo = self
            .repository
            .find_by_placa(placa, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado.".to_string()))?;

        Ok(VehiculoResponse::from(vehiculo))
    }

    pub async fn update(
        &self,
        empresa_id: i64,
        id: &str,
        request: UpdateVehiculoRequest,
    ) -> AppResult<ApiResponse<VehiculoResponse>> {
        request.validate()?;

        let vehiculo = self
            .repository
            .update(
                id,
                empresa_id,
                request.marca,
                request.placa,
                request.modelo,
                request.lateral,
                request.anio_fabricacion,
                request.capacidad_pasajeros,
                request.estado_operativo,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            VehiculoResponse::from(vehiculo),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, empresa_id: i64, id: &str) -> AppResult<()> {
        self.repository.delete(id, empresa_id).await
    }
}
