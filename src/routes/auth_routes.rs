//! Rutas públicas: login y registro de empresas

use axum::{
    extract::State,
    routing::post,
    Form, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::empresa_dto::{ApiResponse, EmpresaResponse, RegisterEmpresaRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/token", post(login))
        .route("/empresas/", post(register_empresa))
}

async fn login(
    State(state): State<AppState>,
    Form(form_data): Form<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.login(form_data).await?;
    Ok(Json(response))
}

async fn register_empresa(
    State(state): State<AppState>,
    Json(request): Json<RegisterEmpresaRequest>,
) -> Result<Json<ApiResponse<EmpresaResponse>>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.register_empresa(request).await?;
    Ok(Json(response))
}
