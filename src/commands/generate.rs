use colored::*;
use std::path::Path;

use test_case_generator::generate_suite;
use test_case_generator::utils::{extract_text, GroqClient};
use test_case_generator::Result;

use super::{base_name, export_suite, AppContext};

/// Genera casos de prueba a partir de un documento y los exporta
pub fn generate_test_cases(
    ctx: &AppContext,
    file: &Path,
    name: Option<String>,
    query: Option<String>,
) -> Result<()> {
    // Verificar la clave API antes de procesar el documento
    let client = GroqClient::new(ctx.api_key.clone(), &ctx.config)?;

    println!("{}", format!("Procesando {}...", file.display()).blue());
    let context = extract_text(file)?;
    println!(
        "{}",
        format!("Documento procesado: {} caracteres", context.chars().count()).green()
    );

    println!(
        "{}",
        format!("Generando casos de prueba con {}...", ctx.config.model).blue()
    );
    let suite = generate_suite(&client, &ctx.config, &context, query.as_deref())?;

    export_suite(ctx, &base_name(name, file), &suite)
}
