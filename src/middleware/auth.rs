//! Middleware de autenticación
//!
//! Resuelve cada request a su principal (empresa o usuario) y a la base
//! de datos de su empresa. El handle con alcance de empresa viaja en un
//! `AuthContext` explícito dentro de las extensions del request; nunca se
//! muta la entidad del principal.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

use crate::models::{empresa::Empresa, usuario::Usuario};
use crate::repositories::empresa_repository::EmpresaRepository;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::services::jwt_service::TipoPrincipal;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Principal autenticado: la cuenta dueña de la empresa o un usuario
/// con alcance de empresa
#[derive(Debug, Clone)]
pub enum Principal {
    Empresa(Empresa),
    Usuario(Usuario),
}

impl Principal {
    pub fn email(&self) -> &str {
        match self {
            Principal::Empresa(e) => &e.email,
            Principal::Usuario(u) => &u.email,
        }
    }

    /// Solo la cuenta de la empresa o un usuario admin gestionan usuarios
    pub fn puede_gestionar_usuarios(&self) -> bool {
        match self {
            Principal::Empresa(_) => true,
            Principal::Usuario(u) => u.es_admin(),
        }
    }
}

/// Contexto del request autenticado: principal + handle con alcance de
/// empresa. Se inyecta en las extensions y los handlers lo reciben con
/// `Extension<AuthContext>`.
#[derive(Clone)]
pub struct AuthContext {
    pub principal: Principal,
    pub empresa_id: i64,
    /// Pool de la base aislada de la empresa del principal
    pub store: SqlitePool,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extraer token del header Authorization
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // 2. Verificar firma y expiración
    let claims = state
        .jwt
        .verify(token)
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

    // 3. Tipo de principal declarado en los claims
    let tipo = TipoPrincipal::from_str(&claims.tipo)
        .ok_or_else(|| AppError::Unauthorized("Tipo de principal desconocido".to_string()))?;

    // 4. Cargar el principal desde el directorio global y 5. resolver la
    // base de su empresa
    let context = match tipo {
        TipoPrincipal::Empresa => {
            let empresa = EmpresaRepository::new(state.pool.clone())
                .find_by_email(&claims.sub)
                .await?
                .ok_or_else(|| {
                    AppError::Unauthorized(format!(
                        "Empresa no encontrada para el email: {}",
                        claims.sub
                    ))
                })?;

            let store = state.tenants.resolve(&empresa.email).await?;
            AuthContext {
                empresa_id: empresa.id,
                principal: Principal::Empresa(empresa),
                store,
            }
        }
        TipoPrincipal::Usuario => {
            let usuario = UsuarioRepository::new(state.pool.clone())
                .find_by_email(&claims.sub)
                .await?
                .ok_or_else(|| {
                    AppError::Unauthorized("No se pudieron validar las credenciales".to_string())
                })?;

            if !usuario.activo {
                return Err(AppError::Forbidden("Usuario inactivo".to_string()));
            }

            let empresa = EmpresaRepository::new(state.pool.clone())
                .find_by_id(usuario.empresa_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "Empresa {} del usuario no existe",
                        usuario.empresa_id
                    ))
                })?;

            let store = state.tenants.resolve(&empresa.email).await?;
            AuthContext {
                empresa_id: empresa.id,
                principal: Principal::Usuario(usuario),
                store,
            }
        }
    };

    // 6. Entregar el contexto enriquecido al handler
    tracing::debug!("Principal autenticado: {}", context.principal.email());
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
