//! Rutas de trayectos (requieren autenticación)

use axum::{
    extract::{Multipart, Path},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::trayecto_controller::TrayectoController;
use crate::dto::empresa_dto::ApiResponse;
use crate::dto::trayecto_dto::{
    BulkImportResponse, CreateTrayectoRequest, TrayectoResponse, UpdateTrayectoRequest,
};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trayecto_router() -> Router<AppState> {
    Router::new()
        .route("/trayectos/", post(create_trayecto).get(list_trayectos))
        .route("/trayectos/bulk", post(bulk_trayectos))
        .route("/trayectos/activos/", get(list_trayectos_activos))
        .route(
            "/trayecto/:id",
            get(get_trayecto).patch(update_trayecto).delete(delete_trayecto),
        )
}

async fn create_trayecto(
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateTrayectoRequest>,
) -> Result<Json<ApiResponse<TrayectoResponse>>, AppError> {
    let controller = TrayectoController::new(ctx.store.clone());
    let response = controller.create(ctx.empresa_id, request).await?;
    Ok(Json(response))
}

async fn list_trayectos(
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<TrayectoResponse>>, AppError> {
    let controller = TrayectoController::new(ctx.store.clone());
    let response = controller.list(ctx.empresa_id).await?;
    Ok(Json(response))
}

async fn list_trayectos_activos(
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<TrayectoResponse>>, AppError> {
    let controller = TrayectoController::new(ctx.store.clone());
    let response = controller.list_activos(ctx.empresa_id).await?;
    Ok(Json(response))
}

/// Importación masiva: multipart con un campo `file` CSV delimitado por `;`
async fn bulk_trayectos(
    Extension(ctx): Extension<AuthContext>,
    mut multipart: Multipart,
) -> Result<Json<BulkImportResponse>, AppError> {
    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Error al leer el archivo: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Error al leer el archivo: {}", e)))?;
            data = Some(bytes);
            break;
        }
    }

    let data =
        data.ok_or_else(|| AppError::BadRequest("Se requiere el campo 'file'".to_string()))?;

    let controller = TrayectoController::new(ctx.store.clone());
    let response = controller.bulk_import(ctx.empresa_id, &data).await?;
    Ok(Json(response))
}

async fn get_trayecto(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<TrayectoResponse>, AppError> {
    let controller = TrayectoController::new(ctx.store.clone());
    let response = controller.get_by_id(ctx.empresa_id, &id).await?;
    Ok(Json(response))
}

async fn update_trayecto(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTrayectoRequest>,
) -> Result<Json<ApiResponse<TrayectoResponse>>, AppError> {
    let controller = TrayectoController::new(ctx.store.clone());
    let response = controller.update(ctx.empresa_id, &id, request).await?;
    Ok(Json(response))
}

async fn delete_trayecto(
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TrayectoController::new(ctx.store.clone());
    controller.delete(ctx.empresa_id, &id).await?;
    Ok(Json(serde_json::json!({
        "detail": "Trayecto eliminado exitosamente."
    })))
}
