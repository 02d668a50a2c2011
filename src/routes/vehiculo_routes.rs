//! Rutas de vehículos (requieren autenticación)

use axum::{
    extract::Path,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::vehiculo_controller::VehiculoController;
use crate::dto::empresa_dto::ApiResponse;
use crate::dto::vehiculo_dto::{CreateVehiculoRequest, UpdateVehiculoRequest, VehiculoResponse};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehiculo_router() -> Router<AppState> {
    Router::new()
        .route("/vehiculos/", post(create_vehiculos).get(list_vehiculos))
        .route(
            "/vehiculo/:id",
            get(get_vehiculo)
                .put(update_vehiculo)
                .patch(update_vehiculo_parcial)
                .delete(delete_vehiculo),
        )
}

async fn create_vehiculos(
    Extension(ctx): Extension<AuthContext>,
    Json(vehiculos): Json<Vec<CreateVehiculoRequest>>,
) -> Result<Json<ApiResponse<Vec<VehiculoResponse>>>, AppError> {
    let controller = VehiculoController::new(ctx.store.clone());
    let response = controller.create_many(ctx.empresa_id, vehiculos).await?;
    Ok(Json(response))
}

async fn list_vehiculos(
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<VehiculoResponse>>, AppError> {
    let controller = VehiculoController::new(ctx.store.clone());
    let response = controller.list(ctx.empresa_id).await?;
    Ok(Json(response))
}

/// El GET busca por placa, la llave natural del vehículo
async fn get_vehiculo(
    Extension(ctx): Extension<AuthContext>,
    Path(placa): Path<String>,
) -> Result<Json<VehiculoResponse>, AppError> {
    let controller = VehiculoController::new(ctx.store.clone());
    let response = controller.get_by_placa(ctx.empresa_id, &placa).await?;
    Ok(Json(response))
}

async fn update_vehiculo(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehiculoRequest>,
) -> Result<Json<ApiResponse<VehiculoResponse>>, AppError> {
    let controller = VehiculoController::new(ctx.store.clone());
    let response = controller.update(ctx.empresa_id, &id, request).await?;
    Ok(Json(response))
}

async fn update_vehiculo_parcial(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehiculoRequest>,
) -> Result<Json<ApiResponse<VehiculoResponse>>, AppError> {
    let controller = VehiculoController::new(ctx.store.clone());
    let response = controller.update(ctx.empresa_id, &id, request).await?;
    Ok(Json(response))
}

async fn delete_vehiculo(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehiculoController::new(ctx.store.clone());
    controller.delete(ctx.empresa_id, &id).await?;
    Ok(Json(serde_json::json!({
        "detail": "Vehículo eliminado exitosamente."
    })))
}
