//! Controller de usuarios
//!
//! La gestión de usuarios queda reservada a la cuenta de la empresa y a
//! los usuarios con rol admin; los agentes reciben 403.

use validator::Validate;

use crate::dto::empresa_dto::ApiResponse;
use crate::dto::usuario_dto::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioResponse};
use crate::middleware::auth::AuthContext;
use crate::repositories::empresa_repository::EmpresaRepository;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::services::password_service::hash_password;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct UsuarioController {
    repository: UsuarioRepository,
    empresas: EmpresaRepository,
}

impl UsuarioController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: UsuarioRepository::new(state.pool.clone()),
            empresas: EmpresaRepository::new(state.pool.clone()),
        }
    }

    fn exigir_gestion(ctx: &AuthContext) -> AppResult<()> {
        if !ctx.principal.puede_gestionar_usuarios() {
            return Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateUsuarioRequest,
    ) -> AppResult<ApiResponse<UsuarioResponse>> {
        Self::exigir_gestion(ctx)?;
        request.validate()?;

        // El email es único en todo el sistema, no solo dentro de la empresa
        if self.empresas.email_registrado(&request.email).await? {
            return Err(AppError::Conflict("Email ya registrado".to_string()));
        }

        let hashed_password = hash_password(&request.password)?;
        let usuario = self
            .repository
            .create(
                request.email,
                request.username,
                hashed_password,
                request.rol,
                ctx.empresa_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UsuarioResponse::from(usuario),
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, ctx: &AuthContext) -> AppResult<Vec<UsuarioResponse>> {
        Self::exigir_gestion(ctx)?;

        let usuarios = self.repository.list_by_empresa(ctx.empresa_id).await?;
        Ok(usuarios.into_iter().map(UsuarioResponse::from).collect())
    }

    pub async fn get_by_id(&self, ctx: &AuthContext, id: i64) -> AppResult<UsuarioResponse> {
        Self::exigir_gestion(ctx)?;

        let usuario = self
            .repository
            .find_by_id(id, ctx.empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado.".to_string()))?;

        Ok(UsuarioResponse::from(usuario))
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: i64,
        request: UpdateUsuarioRequest,
    ) -> AppResult<ApiResponse<UsuarioResponse>> {
        Self::exigir_gestion(ctx)?;
        request.validate()?;

        let hashed_password = match &request.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let usuario = self
            .repository
            .update(
                id,
                ctx.empresa_id,
                request.username,
                hashed_password,
                request.rol,
                request.activo,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UsuarioResponse::from(usuario),
            "Usuario actualizado exitosamente".to_string(),
        ))
    }

    /// La eliminación es una baja lógica: el usuario queda inactivo y sus
    /// logins posteriores responden 403
    pub async fn delete(&self, ctx: &AuthContext, id: i64) -> AppResult<()> {
        Self::exigir_gestion(ctx)?;
        self.repository.desactivar(id, ctx.empresa_id).await
    }
}
