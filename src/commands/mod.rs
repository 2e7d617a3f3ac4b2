pub mod chat;
pub mod generate;
pub mod list;
pub mod parse;

pub use chat::*;
pub use generate::*;
pub use list::*;
pub use parse::*;

use colored::*;
use std::path::Path;

use test_case_generator::config::Config;
use test_case_generator::utils::export_test_cases;
use test_case_generator::{Result, TestSuite};

/// Configuración compartida por todos los comandos
pub struct AppContext {
    pub config: Config,
    pub api_key: Option<String>,
}

/// Nombre base de la exportación: el indicado o el nombre del archivo de origen
fn base_name(name: Option<String>, source: &Path) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("test_cases")
            .to_string(),
    }
}

/// Guarda la suite y muestra el resultado
fn export_suite(ctx: &AppContext, base_name: &str, suite: &TestSuite) -> Result<()> {
    if suite.is_fallback() {
        println!(
            "{}",
            "ADVERTENCIA: No se pudo interpretar la respuesta del modelo. Se exporta un caso para revisión manual.".yellow()
        );
    }

    let paths = export_test_cases(
        &ctx.config.output_dir,
        base_name,
        &suite.test_cases,
        &suite.rows,
    )?;

    println!(
        "{}",
        format!(
            "{} casos de prueba expandidos a {} pasos",
            suite.test_cases.len(),
            suite.rows.len()
        )
        .green()
    );
    println!(
        "{}",
        format!("Hoja de pasos (CSV) guardada en {}", paths.sheet.display()).green()
    );
    println!("Resumen (CSV): {}", paths.summary.display());
    println!("Informe (Markdown): {}", paths.report.display());

    Ok(())
}
