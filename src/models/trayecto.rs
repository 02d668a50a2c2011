//! Modelo de Trayecto
//!
//! Un trayecto programa un viaje en una fecha con hora de salida y de
//! llegada. Las referencias a ruta, conductor y vehículo son opcionales.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trayecto {
    pub id: String,
    pub fecha: NaiveDate,
    pub hora_salida: NaiveTime,
    pub hora_llegada: NaiveTime,
    pub cantidad_pasajeros: i64,
    pub kilometraje: i64,
    pub observaciones: Option<String>,
    pub ruta_id: Option<String>,
    pub conductor_id: Option<String>,
    pub vehiculo_id: Option<String>,
    pub empresa_id: i64,
}

impl Trayecto {
    /// Dos trayectos se solapan cuando comparten fecha y sus intervalos
    /// semiabiertos `[salida, llegada)` se cruzan. Programar un trayecto
    /// que arranca justo cuando otro termina es válido.
    pub fn se_solapa_con(&self, otro: &Trayecto) -> bool {
        self.fecha == otro.fecha
            && self.hora_salida < otro.hora_llegada
            && otro.hora_salida < self.hora_llegada
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trayecto(salida: (u32, u32), llegada: (u32, u32)) -> Trayecto {
        Trayecto {
            id: "t".to_string(),
            fecha: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            hora_salida: NaiveTime::from_hms_opt(salida.0, salida.1, 0).unwrap(),
            hora_llegada: NaiveTime::from_hms_opt(llegada.0, llegada.1, 0).unwrap(),
            cantidad_pasajeros: 0,
            kilometraje: 0,
            observaciones: None,
            ruta_id: None,
            conductor_id: None,
            vehiculo_id: None,
            empresa_id: 1,
        }
    }

    #[test]
    fn test_intervalos_cruzados_se_solapan() {
        let a = trayecto((8, 0), (10, 0));
        let b = trayecto((9, 30), (11, 0));
        assert!(a.se_solapa_con(&b));
        assert!(b.se_solapa_con(&a));
    }

    #[test]
    fn test_trayectos_consecutivos_no_se_solapan() {
        let a = trayecto((8, 0), (10, 0));
        let b = trayecto((10, 0), (12, 0));
        assert!(!a.se_solapa_con(&b));
        assert!(!b.se_solapa_con(&a));
    }

    #[test]
    fn test_fechas_distintas_no_se_solapan() {
        let a = trayecto((8, 0), (10, 0));
        let mut b = trayecto((8, 0), (10, 0));
        b.fecha = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert!(!a.se_solapa_con(&b));
    }
}
