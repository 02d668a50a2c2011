//! Ensamblado del router de la API
//!
//! Las rutas públicas (login, registro de empresas, health) van sin
//! middleware; todo lo demás pasa por el middleware de autenticación que
//! resuelve el principal y la base de su empresa.

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

pub mod auth_routes;
pub mod conductor_routes;
pub mod ruta_routes;
pub mod trayecto_routes;
pub mod usuario_routes;
pub mod vehiculo_routes;

pub fn create_api_router(state: AppState) -> Router {
    let publico = Router::new()
        .route("/health", get(health))
        .merge(auth_routes::create_auth_router());

    let protegido = Router::new()
        .merge(usuario_routes::create_usuario_router())
        .merge(conductor_routes::create_conductor_router())
        .merge(vehiculo_routes::create_vehiculo_router())
        .merge(ruta_routes::create_ruta_router())
        .merge(trayecto_routes::create_trayecto_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    publico.merge(protegido).layer(cors).with_state(state)
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
