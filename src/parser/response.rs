//! Conversión de la respuesta en texto del modelo a casos de prueba normalizados.
//!
//! El análisis nunca falla hacia el llamador: una respuesta sin JSON produce un
//! caso genérico y una estructura inesperada produce un caso de diagnóstico con
//! el mensaje de error y el texto original truncado.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{TestCase, DEFAULT_FIELD_VALUE};

/// Pasos del caso genérico cuando la respuesta no contiene JSON utilizable
pub const GENERIC_TEST_STEPS: &str = "1. Review context\n2. Execute test\n3. Validate results";

/// Título del caso de diagnóstico
pub const PARSING_ERROR_TITLE: &str = "Parsing Error";

const FALLBACK_ID: &str = "TC001";
const DESCRIPTION_PREVIEW_CHARS: usize = 200;
const RAW_PREVIEW_CHARS: usize = 500;

/// Campos multilínea donde el modelo suele escapar dos veces los saltos de línea
const MULTILINE_FIELDS: [&str; 3] = ["test_steps", "preconditions", "expected_result"];

#[derive(Debug, Error)]
enum ParseError {
    #[error("la respuesta JSON debe ser un arreglo de objetos, se encontró {0}")]
    UnexpectedRoot(&'static str),

    #[error("el elemento {index} no es un objeto, se encontró {found}")]
    NotAnObject { index: usize, found: &'static str },

    #[error("el campo '{field}' del elemento {index} debe ser texto, se encontró {found}")]
    NotAString {
        index: usize,
        field: &'static str,
        found: &'static str,
    },
}

/// Analiza la respuesta del modelo y devuelve siempre al menos un caso de prueba
pub fn parse_response(raw_text: &str) -> Vec<TestCase> {
    let text = raw_text.trim();

    match try_parse(text) {
        Ok(test_cases) => {
            info!("Se obtuvieron {} casos de prueba de la respuesta", test_cases.len());
            test_cases
        }
        Err(e) => {
            warn!("Error al analizar la respuesta: {}", e);
            vec![diagnostic_fallback(text, &e)]
        }
    }
}

fn try_parse(text: &str) -> Result<Vec<TestCase>, ParseError> {
    let Some(json_str) = extract_json_array(text) else {
        warn!("No se encontró JSON en la respuesta, se crea un caso genérico");
        return Ok(vec![generic_fallback(text)]);
    };

    let value = match serde_json::from_str::<Value>(json_str) {
        Ok(value) => value,
        Err(e) => {
            warn!("JSON inválido en la respuesta ({}), se crea un caso genérico", e);
            return Ok(vec![generic_fallback(text)]);
        }
    };

    let items = root_items(value)?;

    if items.is_empty() {
        warn!("La respuesta contiene un arreglo vacío, se crea un caso genérico");
        return Ok(vec![generic_fallback(text)]);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => normalize_case(index, map),
            other => Err(ParseError::NotAnObject {
                index,
                found: json_kind(&other),
            }),
        })
        .collect()
}

/// Elementos del valor decodificado: un arreglo tal cual, un objeto suelto
/// como un único elemento.
///
/// El tramo que llega desde `try_parse` empieza en `[`, así que desde ahí la
/// raíz siempre es un arreglo.
fn root_items(value: Value) -> Result<Vec<Value>, ParseError> {
    match value {
        Value::Array(items) => Ok(items),
        object @ Value::Object(_) => Ok(vec![object]),
        other => Err(ParseError::UnexpectedRoot(json_kind(&other))),
    }
}

/// Indica si el caso es el genérico o el de diagnóstico en lugar de uno del modelo
pub fn is_fallback_case(test_case: &TestCase) -> bool {
    test_case.id == FALLBACK_ID
        && (test_case.title == PARSING_ERROR_TITLE || test_case.test_steps == GENERIC_TEST_STEPS)
}

/// Devuelve el tramo entre el primer `[` y el último `]`.
///
/// Si el texto que rodea al arreglo también contiene corchetes, el tramo puede
/// incluir contenido de más y la decodificación terminará en el caso genérico.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;

    if end < start {
        return None;
    }

    Some(&text[start..=end])
}

/// Sustituye la secuencia literal `\n` por un salto de línea real
pub fn repair_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

fn normalize_case(index: usize, mut map: Map<String, Value>) -> Result<TestCase, ParseError> {
    for field in MULTILINE_FIELDS {
        if let Some(Value::String(text)) = map.get_mut(field) {
            *text = repair_newlines(text);
        }
    }

    let priority = optional_field(&mut map, "priority");
    let test_type = optional_field(&mut map, "test_type");
    let mut required = |field: &'static str| required_field(&mut map, index, field);

    let test_case = TestCase {
        id: required("test_case_id")?,
        title: required("title")?,
        description: required("description")?,
        preconditions: required("preconditions")?,
        test_steps: required("test_steps")?,
        expected_result: required("expected_result")?,
        test_data: required("test_data")?,
        module: required("module")?,
        priority,
        test_type,
    };

    debug!("Caso normalizado: {} - {}", test_case.id, test_case.title);

    Ok(test_case)
}

fn required_field(
    map: &mut Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<String, ParseError> {
    match map.remove(field) {
        None | Some(Value::Null) => Ok(DEFAULT_FIELD_VALUE.to_string()),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ParseError::NotAString {
            index,
            field,
            found: json_kind(&other),
        }),
    }
}

fn optional_field(map: &mut Map<String, Value>, field: &str) -> Option<String> {
    match map.remove(field) {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

fn generic_fallback(text: &str) -> TestCase {
    TestCase {
        id: FALLBACK_ID.to_string(),
        title: "Generated Test Case".to_string(),
        description: truncate_chars(text, DESCRIPTION_PREVIEW_CHARS),
        preconditions: "System access required".to_string(),
        test_steps: GENERIC_TEST_STEPS.to_string(),
        expected_result: "Test executes successfully".to_string(),
        test_data: "As per requirements".to_string(),
        module: "General".to_string(),
        priority: Some("Medium".to_string()),
        test_type: Some("Functional".to_string()),
    }
}

fn diagnostic_fallback(text: &str, error: &ParseError) -> TestCase {
    TestCase {
        id: FALLBACK_ID.to_string(),
        title: PARSING_ERROR_TITLE.to_string(),
        description: format!("Error: {}", error),
        preconditions: "Manual review required".to_string(),
        test_steps: truncate_chars(text, RAW_PREVIEW_CHARS),
        expected_result: "Successful generation after review".to_string(),
        test_data: "N/A".to_string(),
        module: "System".to_string(),
        priority: None,
        test_type: None,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booleano",
        Value::Number(_) => "un número",
        Value::String(_) => "un texto",
        Value::Array(_) => "un arreglo",
        Value::Object(_) => "un objeto",
    }
}
