//! Controller de trayectos
//!
//! Creación individual con chequeo de disponibilidad, importación masiva
//! por CSV y las consultas de agenda.

use chrono::Local;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::empresa_dto::ApiResponse;
use crate::dto::trayecto_dto::{
    BulkImportResponse, CreateTrayectoRequest, TrayectoCsvRow, TrayectoResponse,
    UpdateTrayectoRequest,
};
use crate::models::trayecto::Trayecto;
use crate::repositories::conductor_repository::ConductorRepository;
use crate::repositories::ruta_repository::RutaRepository;
use crate::repositories::trayecto_repository::TrayectoRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::services::csv_service;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_date, validate_time};

pub struct TrayectoController {
    repository: TrayectoRepository,
    rutas: RutaRepository,
    conductores: ConductorRepository,
    vehiculos: VehiculoRepository,
}

impl TrayectoController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: TrayectoRepository::new(pool.clone()),
            rutas: RutaRepository::new(pool.clone()),
            conductores: ConductorRepository::new(pool.clone()),
            vehiculos: VehiculoRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        empresa_id: i64,
        request: CreateTrayectoRequest,
    ) -> AppResult<ApiResponse<TrayectoResponse>> {
        request.validate()?;

        let trayecto = construir_trayecto(empresa_id, request)?;
        self.validar_referencias(&trayecto).await?;
        self.verificar_disponibilidad(&trayecto, &[]).await?;

        let creado = self.repository.create(trayecto).await?;

        Ok(ApiResponse::success_with_message(
            TrayectoResponse::from(creado),
            "Trayecto creado exitosamente".to_string(),
        ))
    }

    /// Importación masiva desde CSV. Cada fila se valida por separado y
    /// las fallidas se reportan sin abortar el lote; la inserción final es
    /// una sola transacción y una violación de integridad la revierte
    /// completa.
    pub async fn bulk_import(
        &self,
        empresa_id: i64,
        data: &[u8],
    ) -> AppResult<BulkImportResponse> {
        let filas = csv_service::leer_registros::<TrayectoCsvRow>(data)?;

        let mut aceptados: Vec<Trayecto> = Vec::new();
        let mut errores = Vec::new();

        for (numero, resultado) in filas {
            let fila = match resultado {
                Ok(fila) => fila,
                Err(e) => {
                    errores.push(format!("Fila {}: {}", numero, e));
                    continue;
                }
            };

            match self.procesar_fila(empresa_id, fila, &aceptados).await {
                Ok(trayecto) => aceptados.push(trayecto),
                // Los errores de infraestructura abortan el request; los
                // de la fila solo la descartan
                Err(e @ (AppError::Database(_) | AppError::Internal(_))) => return Err(e),
                Err(e) => errores.push(format!("Fila {}: {}", numero, mensaje_de(&e))),
            }
        }

        match self.repository.create_many(aceptados).await {
            Ok(insertados) => Ok(BulkImportResponse {
                trayectos_insertados: insertados.len(),
                errores,
            }),
            Err(AppError::Conflict(msg)) => {
                errores.push(msg);
                Ok(BulkImportResponse {
                    trayectos_insertados: 0,
                    errores,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn procesar_fila(
        &self,
        empresa_id: i64,
        fila: TrayectoCsvRow,
        aceptados: &[Trayecto],
    ) -> AppResult<Trayecto> {
        let fecha = validate_date(&fila.fecha)
            .map_err(|_| AppError::BadRequest(format!("Fecha inválida: '{}'", fila.fecha)))?;
        let hora_salida = validate_time(&fila.hora_salida).map_err(|_| {
            AppError::BadRequest(format!("Hora de salida inválida: '{}'", fila.hora_salida))
        })?;
        let hora_llegada = validate_time(&fila.hora_llegada).map_err(|_| {
            AppError::BadRequest(format!("Hora de llegada inválida: '{}'", fila.hora_llegada))
        })?;

        let trayecto = construir_trayecto(
            empresa_id,
            CreateTrayectoRequest {
                fecha,
                hora_salida,
                hora_llegada,
                cantidad_pasajeros: fila.cantidad_pasajeros,
                kilometraje: fila.kilometraje,
                observaciones: fila.observaciones,
                ruta_id: fila.ruta_id,
                conductor_id: fila.conductor_id,
                vehiculo_id: fila.vehiculo_id,
            },
        )?;

        self.validar_referencias(&trayecto).await?;
        self.verificar_disponibilidad(&trayecto, aceptados).await?;

        Ok(trayecto)
    }

    /// Las referencias opcionales deben existir en la base de la empresa
    async fn validar_referencias(&self, trayecto: &Trayecto) -> AppResult<()> {
        if let Some(ruta_id) = &trayecto.ruta_id {
            if self
                .rutas
                .find_by_id(ruta_id, trayecto.empresa_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest("Ruta no encontrada.".to_string()));
            }
        }

        if let Some(conductor_id) = &trayecto.conductor_id {
            if self
                .conductores
                .find_by_id(conductor_id, trayecto.empresa_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest("Conductor no encontrado.".to_string()));
            }
        }

        if let Some(vehiculo_id) = &trayecto.vehiculo_id {
            if self
                .vehiculos
                .find_by_id(vehiculo_id, trayecto.empresa_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest("Vehículo no encontrado.".to_string()));
            }
        }

        Ok(())
    }

    /// Un conductor o vehículo no puede tener dos trayectos cuyos
    /// intervalos `[salida, llegada)` se crucen en la misma fecha. Los
    /// trayectos ya aceptados del lote en curso también cuentan.
    async fn verificar_disponibilidad(
        &self,
        nuevo: &Trayecto,
        pendientes: &[Trayecto],
    ) -> AppResult<()> {
        if nuevo.conductor_id.is_none() && nuevo.vehiculo_id.is_none() {
            return Ok(());
        }

        let candidatos = self
            .repository
            .find_candidatos_solape(
                nuevo.empresa_id,
                nuevo.fecha,
                nuevo.conductor_id.as_deref(),
                nuevo.vehiculo_id.as_deref(),
            )
            .await?;

        let comparte_recurso = |otro: &Trayecto| {
            let mismo_conductor = nuevo.conductor_id.is_some()
                && nuevo.conductor_id == otro.conductor_id;
            let mismo_vehiculo =
                nuevo.vehiculo_id.is_some() && nuevo.vehiculo_id == otro.vehiculo_id;
            mismo_conductor || mismo_vehiculo
        };

        for otro in candidatos.iter().chain(pendientes) {
            if comparte_recurso(otro) && nuevo.se_solapa_con(otro) {
                return Err(AppError::Conflict(
                    "El conductor o vehículo ya tiene un trayecto asignado en ese horario."
                        .to_string(),
                ));
            }
        }

        Ok(())
    }

    pub async fn list(&self, empresa_id: i64) -> AppResult<Vec<TrayectoResponse>> {
        let trayectos = self.repository.list(empresa_id).await?;
        Ok(trayectos.into_iter().map(TrayectoResponse::from).collect())
    }

    /// Trayectos desde hoy en adelante, ordenados por fecha y hora de salida
    pub async fn list_activos(&self, empresa_id: i64) -> AppResult<Vec<TrayectoResponse>> {
        let hoy = Local::now().date_naive();
        let trayectos = self.repository.list_activos(empresa_id, hoy).await?;
        Ok(trayectos.into_iter().map(TrayectoResponse::from).collect())
    }

    pub async fn get_by_id(&self, empresa_id: i64, id: &str) -> AppResult<TrayectoResponse> {
        let trayecto = self
            .repository
            .find_by_id(id, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trayecto no encontrado.".to_string()))?;

        Ok(TrayectoResponse::from(trayecto))
    }

    pub async fn update(
        &self,
        empresa_id: i64,
        id: &str,
        request: UpdateTrayectoRequest,
    ) -> AppResult<ApiResponse<TrayectoResponse>> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trayecto no encontrado.".to_string()))?;

        // La consistencia horaria se valida sobre los valores ya combinados
        let hora_salida = request.hora_salida.unwrap_or(current.hora_salida);
        let hora_llegada = request.hora_llegada.unwrap_or(current.hora_llegada);
        if hora_llegada < hora_salida {
            return Err(AppError::BadRequest(
                "La hora de llegada no puede ser anterior a la hora de salida.".to_string(),
            ));
        }

        let trayecto = self
            .repository
            .update(
                id,
                empresa_id,
                request.fecha,
                request.hora_salida,
                request.hora_llegada,
                request.cantidad_pasajeros,
                request.kilometraje,
                request.observaciones,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            TrayectoResponse::from(trayecto),
            "Trayecto actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, empresa_id: i64, id: &str) -> AppResult<()> {
        self.repository.delete(id, empresa_id).await
    }
}

fn construir_trayecto(empresa_id: i64, request: CreateTrayectoRequest) -> AppResult<Trayecto> {
    if request.hora_llegada < request.hora_salida {
        return Err(AppError::BadRequest(
            "La hora de llegada no puede ser anterior a la hora de salida.".to_string(),
        ));
    }

    Ok(Trayecto {
        id: Uuid::new_v4().to_string(),
        fecha: request.fecha,
        hora_salida: request.hora_salida,
        hora_llegada: request.hora_llegada,
        cantidad_pasajeros: request.cantidad_pasajeros,
        kilometraje: request.kilometraje,
        observaciones: request.observaciones,
        ruta_id: request.ruta_id,
        conductor_id: request.conductor_id,
        vehiculo_id: request.vehiculo_id,
        empresa_id,
    })
}

/// Mensaje legible de un error de fila, sin el prefijo del tipo
fn mensaje_de(err: &AppError) -> String {
    match err {
        AppError::BadRequest(msg)
        | AppError::Conflict(msg)
        | AppError::NotFound(msg)
        | AppError::Forbidden(msg)
        | AppError::Unauthorized(msg) => msg.clone(),
        otro => otro.to_string(),
    }
}
