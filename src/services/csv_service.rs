//! Lectura de archivos CSV para importación masiva
//!
//! Los archivos vienen delimitados por `;` con una fila de encabezados y
//! un registro por fila. Cada fila se decodifica de forma independiente:
//! una fila malformada no aborta el resto del archivo.

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;

use crate::utils::errors::{AppError, AppResult};

/// Decodificar el contenido del archivo. Devuelve cada fila de datos con
/// su número (la primera fila de datos es la 1) y el resultado de su
/// decodificación; solo un archivo ilegible como un todo produce `Err`.
pub fn leer_registros<T>(data: &[u8]) -> AppResult<Vec<(usize, Result<T, String>)>>
where
    T: DeserializeOwned,
{
    let contenido = std::str::from_utf8(data)
        .map_err(|_| AppError::BadRequest("El archivo no es UTF-8 válido".to_string()))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(contenido.as_bytes());

    let filas = reader
        .deserialize::<T>()
        .enumerate()
        .map(|(i, resultado)| (i + 1, resultado.map_err(|e| e.to_string())))
        .collect();

    Ok(filas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Fila {
        nombre: String,
        valor: i64,
    }

    #[test]
    fn test_decodifica_filas_delimitadas_por_punto_y_coma() {
        let data = b"nombre;valor\nuno;1\ndos;2\n";
        let filas = leer_registros::<Fila>(data).unwrap();
        assert_eq!(filas.len(), 2);
        assert_eq!(filas[0].0, 1);
        assert_eq!(filas[0].1.as_ref().unwrap().nombre, "uno");
        assert_eq!(filas[1].1.as_ref().unwrap().valor, 2);
    }

    #[test]
    fn test_fila_malformada_no_aborta_el_archivo() {
        let data = b"nombre;valor\nuno;1\nmala;no_es_numero\ntres;3\n";
        let filas = leer_registros::<Fila>(data).unwrap();
        assert_eq!(filas.len(), 3);
        assert!(filas[0].1.is_ok());
        assert!(filas[1].1.is_err());
        assert!(filas[2].1.is_ok());
    }

    #[test]
    fn test_archivo_no_utf8_se_rechaza_completo() {
        let data = [0xff, 0xfe, 0x00];
        assert!(leer_registros::<Fila>(&data).is_err());
    }
}
