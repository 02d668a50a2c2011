//! Repositorio de usuarios (directorio global)
//!
//! Los usuarios viven en la base principal porque el login y la
//! resolución de principal los busca por email en todo el sistema; cada
//! fila lleva `empresa_id` y las operaciones de gestión filtran por él.

use sqlx::SqlitePool;

use crate::models::usuario::Usuario;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct UsuarioRepository {
    pool: SqlitePool,
}

impl UsuarioRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: String,
        username: String,
        hashed_password: String,
        rol: String,
        empresa_id: i64,
    ) -> AppResult<Usuario> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (email, username, hashed_password, rol, activo, empresa_id)
            VALUES (?1, ?2, ?3, ?4, 1, ?5)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(hashed_password)
        .bind(rol)
        .bind(empresa_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Email ya registrado".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(usuario)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    pub async fn find_by_id(&self, id: i64, empresa_id: i64) -> AppResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE id = ?1 AND empresa_id = ?2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn list_by_empresa(&self, empresa_id: i64) -> AppResult<Vec<Usuario>> {
        let usuarios = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE empresa_id = ?1 ORDER BY id",
        )
        .bind(empresa_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(usuarios)
    }

    /// Actualización parcial: los campos en `None` conservan su valor
    pub async fn update(
        &self,
        id: i64,
        empresa_id: i64,
        username: Option<String>,
        hashed_password: Option<String>,
        rol: Option<String>,
        activo: Option<bool>,
    ) -> AppResult<Usuario> {
        let current = self
            .find_by_id(id, empresa_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado.".to_string()))?;

        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET username = ?3, hashed_password = ?4, rol = ?5, activo = ?6
            WHERE id = ?1 AND empresa_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(empresa_id)
        .bind(username.unwrap_or(current.username))
        .bind(hashed_password.unwrap_or(current.hashed_password))
        .bind(rol.unwrap_or(current.rol))
        .bind(activo.unwrap_or(current.activo))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username ya registrado".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(usuario)
    }

    /// Baja lógica: el usuario queda inactivo, nunca se borra la fila
    pub async fn desactivar(&self, id: i64, empresa_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE usuarios SET activo = 0 WHERE id = ?1 AND empresa_id = ?2",
        )
        .bind(id)
        .bind(empresa_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado.".to_string()));
        }

        Ok(())
    }
}
