use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::ChatMessage;

/// Petición de una respuesta al modelo
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Proveedor de respuestas del modelo de lenguaje
pub trait CompletionProvider {
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Cliente de la API de chat completions de Groq
pub struct GroqClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: Option<String>, config: &Config) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
        })
    }
}

impl CompletionProvider for GroqClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let mut request_body = serde_json::json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });
        if let Some(max_tokens) = request.max_tokens {
            request_body["max_tokens"] = max_tokens.into();
        }

        info!(
            "Enviando {} mensajes al modelo {}",
            request.messages.len(),
            self.model
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // El cuerpo de error es opcional, si no se puede leer se usa el estado
            let message = response
                .json::<Value>()
                .ok()
                .and_then(|json| api_error_message(&json))
                .unwrap_or_else(|| status.to_string());
            warn!("Error de la API de Groq ({}): {}", status, message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let json = response.json::<Value>()?;
        let content = completion_content(&json).ok_or(Error::EmptyCompletion)?;

        debug!("Respuesta recibida: {} caracteres", content.len());

        Ok(content)
    }
}

/// Texto de la primera opción de una respuesta de chat completions
pub fn completion_content(json: &Value) -> Option<String> {
    json.get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn api_error_message(json: &Value) -> Option<String> {
    json.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
