use serde::{Deserialize, Serialize};

/// Valor asignado a cualquier campo obligatorio ausente en la respuesta del modelo
pub const DEFAULT_FIELD_VALUE: &str = "To be defined";

/// Caso de prueba normalizado a partir de la respuesta del modelo
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TestCase {
    #[serde(rename = "test_case_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub preconditions: String,
    /// Pasos separados por saltos de línea
    pub test_steps: String,
    pub expected_result: String,
    pub test_data: String,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
}

/// Fila de la tabla a nivel de caso, usada cuando no hay pasos que expandir
#[derive(Debug, Serialize)]
pub struct TestCaseRecord<'a> {
    #[serde(rename = "Test Case ID")]
    pub id: &'a str,
    #[serde(rename = "Test Case Title")]
    pub title: &'a str,
    #[serde(rename = "Description")]
    pub description: &'a str,
    #[serde(rename = "Preconditions")]
    pub preconditions: &'a str,
    #[serde(rename = "Test Steps")]
    pub test_steps: &'a str,
    #[serde(rename = "Expected Result")]
    pub expected_result: &'a str,
    #[serde(rename = "Test Data")]
    pub test_data: &'a str,
    #[serde(rename = "Module/Feature")]
    pub module: &'a str,
}

impl<'a> From<&'a TestCase> for TestCaseRecord<'a> {
    fn from(test_case: &'a TestCase) -> Self {
        Self {
            id: &test_case.id,
            title: &test_case.title,
            description: &test_case.description,
            preconditions: &test_case.preconditions,
            test_steps: &test_case.test_steps,
            expected_result: &test_case.expected_result,
            test_data: &test_case.test_data,
            module: &test_case.module,
        }
    }
}
