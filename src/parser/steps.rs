//! Expansión de casos de prueba en una fila por paso para la hoja exportada

use tracing::{debug, trace};

use crate::models::{StepRow, TestCase};

/// Marca que indica que el paso necesita una captura de pantalla como evidencia
pub const SCREENSHOT_MARKER: &str = "**Add screenshot here";

/// Palabras que delatan un paso de verificación visual
pub const SCREENSHOT_KEYWORDS: [&str; 9] = [
    "verify",
    "check",
    "confirm",
    "validate",
    "ensure",
    "displayed",
    "appears",
    "shown",
    "visible",
];

/// Convierte los casos en filas, una por paso, conservando el orden de casos y pasos
pub fn expand_steps(test_cases: &[TestCase]) -> Vec<StepRow> {
    let mut rows = Vec::new();

    for test_case in test_cases {
        let steps = split_steps(&test_case.test_steps);

        if steps.is_empty() {
            debug!("El caso {} no tiene pasos, se omite", test_case.id);
            continue;
        }

        // Aún no se asigna a pasos concretos, solo se usa el resultado completo
        let expected_results = expected_result_lines(test_case);
        trace!(
            "Caso {}: {} pasos, {} líneas de resultado esperado",
            test_case.id,
            steps.len(),
            expected_results.len()
        );

        let total = steps.len();
        for (index, step) in steps.into_iter().enumerate() {
            let step_number = index + 1;
            let expected =
                step_expected_result(step, step_number == total, &test_case.expected_result);
            rows.push(StepRow::new(test_case, step_number, step, expected));
        }
    }

    debug!("{} casos expandidos a {} filas", test_cases.len(), rows.len());

    rows
}

/// Líneas no vacías de `test_steps`, sin espacios en los extremos
pub fn split_steps(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Desglose por líneas del resultado esperado del caso
pub fn expected_result_lines(test_case: &TestCase) -> Vec<&str> {
    split_steps(&test_case.expected_result)
}

/// Indica si el paso contiene alguna palabra clave de verificación visual, sin
/// distinguir mayúsculas
pub fn needs_screenshot(step: &str) -> bool {
    let step = step.to_lowercase();
    SCREENSHOT_KEYWORDS
        .iter()
        .any(|keyword| step.contains(keyword))
}

fn step_expected_result(step: &str, is_last: bool, case_expected_result: &str) -> String {
    match (needs_screenshot(step), is_last) {
        (true, true) => format!("{}\n{}", SCREENSHOT_MARKER, case_expected_result),
        (true, false) => SCREENSHOT_MARKER.to_string(),
        (false, true) => case_expected_result.to_string(),
        (false, false) => String::new(),
    }
}
