//! Configuración opcional en `testgen.toml`

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "testgen.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Endpoint de chat completions compatible con OpenAI
    pub api_url: String,
    pub model: String,
    /// Temperatura para la generación de casos de prueba
    pub generation_temperature: f32,
    /// Temperatura para las preguntas sobre el documento
    pub chat_temperature: f32,
    pub max_tokens: u32,
    /// Tiempo máximo de espera de cada llamada al modelo, en segundos
    pub timeout_secs: u64,
    /// Carpeta donde se guardan las exportaciones
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            generation_temperature: 0.1,
            chat_temperature: 0.2,
            max_tokens: 9900,
            timeout_secs: 120,
            output_dir: PathBuf::from("exports"),
        }
    }
}

impl Config {
    /// Carga la configuración de `path`, o de `testgen.toml` si existe en el
    /// directorio actual, o los valores por defecto.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Configuración cargada desde {}", path.display());

        Ok(config)
    }
}
