//! Controller de autenticación
//!
//! Login de empresas y usuarios, y registro de empresas. El registro de
//! una empresa provisiona su base de datos aislada antes de responder.

use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::empresa_dto::{ApiResponse, EmpresaResponse, RegisterEmpresaRequest};
use crate::repositories::empresa_repository::EmpresaRepository;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::services::jwt_service::TipoPrincipal;
use crate::services::password_service::{hash_password, verify_password};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Login por formulario username + password. Se intenta primero como
    /// empresa y después como usuario; ambos fallos responden con el
    /// mismo mensaje para no revelar qué cuentas existen.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let credenciales_invalidas =
            || AppError::Unauthorized("Email o contraseña incorrectos".to_string());

        if let Some(empresa) = EmpresaRepository::new(self.state.pool.clone())
            .find_by_email(&request.username)
            .await?
        {
            if !verify_password(&request.password, &empresa.hashed_password)? {
                return Err(credenciales_invalidas());
            }

            let access_token = self.state.jwt.issue(
                &empresa.email,
                TipoPrincipal::Empresa,
                empresa.id,
                None,
                None,
            )?;

            return Ok(LoginResponse {
                access_token,
                token_type: "bearer".to_string(),
                user_type: TipoPrincipal::Empresa.as_str().to_string(),
                role: None,
            });
        }

        if let Some(usuario) = UsuarioRepository::new(self.state.pool.clone())
            .find_by_email(&request.username)
            .await?
        {
            if !verify_password(&request.password, &usuario.hashed_password)? {
                return Err(credenciales_invalidas());
            }

            if !usuario.activo {
                return Err(AppError::Forbidden("Usuario inactivo".to_string()));
            }

            let access_token = self.state.jwt.issue(
                &usuario.email,
                TipoPrincipal::Usuario,
                usuario.empresa_id,
                Some(usuario.rol.clone()),
                None,
            )?;

            return Ok(LoginResponse {
                access_token,
                token_type: "bearer".to_string(),
                user_type: TipoPrincipal::Usuario.as_str().to_string(),
                role: Some(usuario.rol),
            });
        }

        Err(credenciales_invalidas())
    }

    /// Registro de una empresa nueva. El email debe ser único en todo el
    /// sistema; la base aislada de la empresa queda provisionada aquí.
    pub async fn register_empresa(
        &self,
        request: RegisterEmpresaRequest,
    ) -> AppResult<ApiResponse<EmpresaResponse>> {
        request.validate()?;

        let repository = EmpresaRepository::new(self.state.pool.clone());

        if repository.email_registrado(&request.email).await? {
            return Err(AppError::Conflict("Email ya registrado".to_string()));
        }

        let hashed_password = hash_password(&request.password)?;
        let empresa = repository
            .create(request.nombre, request.email, request.nit, hashed_password)
            .await?;

        self.state.tenants.initialize(&empresa.email).await?;

        Ok(ApiResponse::success_with_message(
            EmpresaResponse::from(empresa),
            "Empresa registrada exitosamente".to_string(),
        ))
    }
}
