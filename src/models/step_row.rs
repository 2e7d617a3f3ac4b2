use serde::Serialize;

use crate::models::TestCase;

/// Una fila de la hoja exportada: un paso de un caso de prueba.
///
/// Los campos del caso padre solo se rellenan en el primer paso; el resto de
/// filas los dejan vacíos para no repetirlos en la hoja.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct StepRow {
    #[serde(rename = "Test Case ID")]
    pub test_case_id: String,
    #[serde(rename = "Test Case Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Preconditions")]
    pub preconditions: String,
    #[serde(rename = "Step Number")]
    pub step_number: usize,
    #[serde(rename = "Test Step")]
    pub step_text: String,
    #[serde(rename = "Expected Result")]
    pub expected_result: String,
    /// Siempre vacío, se completa a mano en la hoja
    #[serde(rename = "Screenshot")]
    pub screenshot: String,
    #[serde(rename = "Test Data")]
    pub test_data: String,
}

impl StepRow {
    pub fn new(
        parent: &TestCase,
        step_number: usize,
        step_text: &str,
        expected_result: String,
    ) -> Self {
        let first = step_number == 1;
        let parent_field = |value: &str| {
            if first {
                value.to_string()
            } else {
                String::new()
            }
        };

        Self {
            test_case_id: parent_field(&parent.id),
            title: parent_field(&parent.title),
            description: parent_field(&parent.description),
            preconditions: parent_field(&parent.preconditions),
            step_number,
            step_text: step_text.to_string(),
            expected_result,
            screenshot: String::new(),
            test_data: parent_field(&parent.test_data),
        }
    }

    pub fn is_first_step(&self) -> bool {
        self.step_number == 1
    }
}
