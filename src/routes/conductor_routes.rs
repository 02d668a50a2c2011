//! Rutas de conductores (requieren autenticación)

use axum::{
    extract::Path,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::conductor_controller::ConductorController;
use crate::dto::conductor_dto::{
    ConductorResponse, CreateConductorRequest, UpdateConductorRequest,
};
use crate::dto::empresa_dto::ApiResponse;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_conductor_router() -> Router<AppState> {
    Router::new()
        .route("/conductores/", post(create_conductores).get(list_conductores))
        .route(
            "/conductor/:id",
            get(get_conductor)
                .put(update_conductor)
                .patch(update_conductor_parcial)
                .delete(delete_conductor),
        )
}

async fn create_conductores(
    Extension(ctx): Extension<AuthContext>,
    Json(conductores): Json<Vec<CreateConductorRequest>>,
) -> Result<Json<ApiResponse<Vec<ConductorResponse>>>, AppError> {
    let controller = ConductorController::new(ctx.store.clone());
    let response = controller.create_many(ctx.empresa_id, conductores).await?;
    Ok(Json(response))
}

async fn list_conductores(
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(ctx.store.clone());
    let response = controller.list(ctx.empresa_id).await?;
    Ok(Json(response))
}

/// El GET busca por cédula, la llave natural del conductor
async fn get_conductor(
    Extension(ctx): Extension<AuthContext>,
    Path(cedula): Path<String>,
) -> Result<Json<ConductorResponse>, AppError> {
    let controller = ConductorController::new(ctx.store.clone());
    let response = controller.get_by_cedula(ctx.empresa_id, &cedula).await?;
    Ok(Json(response))
}

async fn update_conductor(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateConductorRequest>,
) -> Result<Json<ApiResponse<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(ctx.store.clone());
    let response = controller.update(ctx.empresa_id, &id, request).await?;
    Ok(Json(response))
}

async fn update_conductor_parcial(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateConductorRequest>,
) -> Result<Json<ApiResponse<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(ctx.store.clone());
    let response = controller.update(ctx.empresa_id, &id, request).await?;
    Ok(Json(response))
}

async fn delete_conductor(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ConductorController::new(ctx.store.clone());
    controller.delete(ctx.empresa_id, &id).await?;
    Ok(Json(serde_json::json!({
        "detail": "Conductor eliminado exitosamente."
    })))
}
