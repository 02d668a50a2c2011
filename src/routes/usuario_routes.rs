//! Rutas de usuarios (requieren autenticación)

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::usuario_controller::UsuarioController;
use crate::dto::empresa_dto::ApiResponse;
use crate::dto::usuario_dto::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioResponse};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_usuario_router() -> Router<AppState> {
    Router::new()
        .route("/usuarios/", post(create_usuario).get(list_usuarios))
        .route(
            "/usuario/:id",
            get(get_usuario).patch(update_usuario).delete(delete_usuario),
        )
}

async fn create_usuario(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, AppError> {
    let controller = UsuarioController::new(&state);
    let response = controller.create(&ctx, request).await?;
    Ok(Json(response))
}

async fn list_usuarios(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<UsuarioResponse>>, AppError> {
    let controller = UsuarioController::new(&state);
    let response = controller.list(&ctx).await?;
    Ok(Json(response))
}

async fn get_usuario(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<UsuarioResponse>, AppError> {
    let controller = UsuarioController::new(&state);
    let response = controller.get_by_id(&ctx, id).await?;
    Ok(Json(response))
}

async fn update_usuario(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, AppError> {
    let controller = UsuarioController::new(&state);
    let response = controller.update(&ctx, id, request).await?;
    Ok(Json(response))
}

async fn delete_usuario(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = UsuarioController::new(&state);
    controller.delete(&ctx, id).await?;
    Ok(Json(serde_json::json!({
        "detail": "Usuario desactivado exitosamente."
    })))
}
