use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::{StepRow, TestCase};
use crate::parser::{expand_steps, is_fallback_case, parse_response};
use crate::utils::groq::{CompletionProvider, CompletionRequest};
use crate::utils::prompts::{generation_messages, DEFAULT_GENERATION_QUERY};

/// Casos de prueba generados y su expansión en filas
#[derive(Debug, Clone)]
pub struct TestSuite {
    pub test_cases: Vec<TestCase>,
    pub rows: Vec<StepRow>,
}

impl TestSuite {
    /// Analiza y expande una respuesta del modelo
    pub fn from_response(raw_text: &str) -> Self {
        let test_cases = parse_response(raw_text);
        let rows = expand_steps(&test_cases);

        Self { test_cases, rows }
    }

    /// Indica si el análisis terminó en un caso de reemplazo
    pub fn is_fallback(&self) -> bool {
        matches!(self.test_cases.as_slice(), [only] if is_fallback_case(only))
    }
}

/// Pide al modelo los casos de prueba del documento y los analiza
pub fn generate_suite(
    provider: &dyn CompletionProvider,
    config: &Config,
    context: &str,
    query: Option<&str>,
) -> Result<TestSuite> {
    let request = CompletionRequest {
        messages: generation_messages(context, query.unwrap_or(DEFAULT_GENERATION_QUERY)),
        temperature: config.generation_temperature,
        max_tokens: Some(config.max_tokens),
    };

    let response = provider.complete(&request)?;
    info!("Respuesta del modelo: {} caracteres", response.chars().count());

    Ok(TestSuite::from_response(&response))
}
