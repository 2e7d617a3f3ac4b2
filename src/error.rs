//! Tipos de error del generador de casos de prueba

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Alias de resultado con nuestro tipo de error
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error de E/S: {0}")]
    Io(#[from] io::Error),

    #[error("Error al escribir CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error al conectar con la API de Groq: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuración inválida en {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Tipo de archivo no soportado: .{0}. Use pdf, docx o txt")]
    UnsupportedFileType(String),

    #[error("No se pudo extraer el texto de {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("El documento {0} no contiene texto")]
    EmptyDocument(PathBuf),

    #[error("No se encontró la clave API de Groq. Configure la variable de entorno GROQ_API_KEY")]
    MissingApiKey,

    #[error("Error de la API de Groq ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("La API de Groq devolvió una respuesta vacía")]
    EmptyCompletion,
}
