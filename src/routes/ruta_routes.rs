//! Rutas de servicio (requieren autenticación)

use axum::{
    extract::Path,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::ruta_controller::RutaController;
use crate::dto::empresa_dto::ApiResponse;
use crate::dto::ruta_dto::{CreateRutaRequest, RutaResponse, UpdateRutaRequest};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ruta_router() -> Router<AppState> {
    Router::new()
        .route("/rutas/", post(create_rutas).get(list_rutas))
        .route(
            "/ruta/:id",
            get(get_ruta)
                .put(update_ruta)
                .patch(update_ruta_parcial)
                .delete(delete_ruta),
        )
}

async fn create_rutas(
    Extension(ctx): Extension<AuthContext>,
    Json(rutas): Json<Vec<CreateRutaRequest>>,
) -> Result<Json<ApiResponse<Vec<RutaResponse>>>, AppError> {
    let controller = RutaController::new(ctx.store.clone());
    let response = controller.create_many(ctx.empresa_id, rutas).await?;
    Ok(Json(response))
}

async fn list_rutas(
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<RutaResponse>>, AppError> {
    let controller = RutaController::new(ctx.store.clone());
    let response = controller.list(ctx.empresa_id).await?;
    Ok(Json(response))
}

/// El GET busca por código, la llave natural de la ruta
async fn get_ruta(
    Extension(ctx): Extension<AuthContext>,
    Path(codigo): Path<String>,
) -> Result<Json<RutaResponse>, AppError> {
    let controller = RutaController::new(ctx.store.clone());
    let response = controller.get_by_codigo(ctx.empresa_id, &codigo).await?;
    Ok(Json(response))
}

async fn update_ruta(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRutaRequest>,
) -> Result<Json<ApiResponse<RutaResponse>>, AppError> {
    let controller = RutaController::new(ctx.store.clone());
    let response = controller.update(ctx.empresa_id, &id, request).await?;
    Ok(Json(response))
}

async fn update_ruta_parcial(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRutaRequest>,
) -> Result<Json<ApiResponse<RutaResponse>>, AppError> {
    let controller = RutaController::new(ctx.store.clone());
    let response = controller.update(ctx.empresa_id, &id, request).await?;
    Ok(Json(response))
}

async fn delete_ruta(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RutaController::new(ctx.store.clone());
    controller.delete(ctx.empresa_id, &id).await?;
    Ok(Json(serde_json::json!({
        "detail": "Ruta eliminada exitosamente."
    })))
}
