//! Repositorio de empresas (directorio global)

use sqlx::SqlitePool;

use crate::models::empresa::Empresa;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct EmpresaRepository {
    pool: SqlitePool,
}

impl EmpresaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nombre: String,
        email: String,
        nit: String,
        hashed_password: String,
    ) -> AppResult<Empresa> {
        let empresa = sqlx::query_as::<_, Empresa>(
            r#"
            INSERT INTO empresas (nombre, email, nit, hashed_password)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(email)
        .bind(nit)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Email ya registrado".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(empresa)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Empresa>> {
        let empresa = sqlx::query_as::<_, Empresa>("SELECT * FROM empresas WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(empresa)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Empresa>> {
        let empresa = sqlx::query_as::<_, Empresa>("SELECT * FROM empresas WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(empresa)
    }

    /// El email debe ser único en todo el sistema: se revisa tanto en
    /// empresas como en usuarios
    pub async fn email_registrado(&self, email: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM empresas WHERE email = ?1)
                OR EXISTS(SELECT 1 FROM usuarios WHERE email = ?1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
