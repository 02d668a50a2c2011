//! Servicio JWT
//!
//! Emisión y verificación de tokens de acceso firmados con HS256. La
//! validez es puramente temporal: no hay lista de revocación, un token
//! comprometido vale hasta su expiración natural.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{AppError, AppResult};

/// Tipo de principal autenticado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoPrincipal {
    Empresa,
    Usuario,
}

impl TipoPrincipal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoPrincipal::Empresa => "empresa",
            TipoPrincipal::Usuario => "usuario",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "empresa" => Some(TipoPrincipal::Empresa),
            "usuario" => Some(TipoPrincipal::Usuario),
            _ => None,
        }
    }
}

/// Claims embebidos en cada token de acceso
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Email del principal
    pub sub: String,
    /// "empresa" o "usuario"
    pub tipo: String,
    pub empresa_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rol: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Servicio JWT
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, default_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::minutes(default_ttl_minutes),
        }
    }

    /// Emitir un token para el principal. Sin `ttl` explícito aplica la
    /// vigencia por defecto de la configuración (30 minutos).
    pub fn issue(
        &self,
        sub: &str,
        tipo: TipoPrincipal,
        empresa_id: i64,
        rol: Option<String>,
        ttl: Option<Duration>,
    ) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + ttl.unwrap_or(self.default_ttl);

        let claims = Claims {
            sub: sub.to_string(),
            tipo: tipo.as_str().to_string(),
            empresa_id,
            rol,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
    }

    /// Verificar y decodificar un token. Firma inválida, estructura
    /// malformada o expiración en el pasado producen error; la expiración
    /// se evalúa sin margen de tolerancia.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("clave_de_prueba", 30)
    }

    #[test]
    fn test_emitir_y_verificar_token() {
        let jwt = service();
        let token = jwt
            .issue(
                "gerencia@flota.com",
                TipoPrincipal::Empresa,
                7,
                None,
                None,
            )
            .unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, "gerencia@flota.com");
        assert_eq!(claims.tipo, "empresa");
        assert_eq!(claims.empresa_id, 7);
        assert!(claims.rol.is_none());
    }

    #[test]
    fn test_token_expirado_se_rechaza() {
        let jwt = service();
        let token = jwt
            .issue(
                "agente@flota.com",
                TipoPrincipal::Usuario,
                7,
                Some("agente".to_string()),
                Some(Duration::seconds(-5)),
            )
            .unwrap();

        assert!(jwt.verify(&token).is_err());
    }

    #[test]
    fn test_token_vigente_se_acepta_antes_de_expirar() {
        let jwt = service();
        let token = jwt
            .issue(
                "agente@flota.com",
                TipoPrincipal::Usuario,
                7,
                Some("admin".to_string()),
                Some(Duration::seconds(60)),
            )
            .unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.rol.as_deref(), Some("admin"));
    }

    #[test]
    fn test_firma_ajena_se_rechaza() {
        let token = service()
            .issue("gerencia@flota.com", TipoPrincipal::Empresa, 7, None, None)
            .unwrap();

        let otro = JwtService::new("otra_clave", 30);
        assert!(otro.verify(&token).is_err());
    }

    #[test]
    fn test_token_malformado_se_rechaza() {
        assert!(service().verify("no.es.un-jwt").is_err());
        assert!(service().verify("").is_err());
    }
}
