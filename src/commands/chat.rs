use colored::*;
use inquire::Text;
use std::path::Path;

use test_case_generator::utils::{extract_text, ChatSession, GroqClient};
use test_case_generator::Result;

use super::AppContext;

const EXIT_COMMANDS: [&str; 3] = ["salir", "exit", "fin"];
const CLEAR_COMMAND: &str = "limpiar";

/// Conversación interactiva sobre el contenido de un documento
pub fn chat_about_document(ctx: &AppContext, file: &Path) -> Result<()> {
    let client = GroqClient::new(ctx.api_key.clone(), &ctx.config)?;

    println!("{}", format!("Procesando {}...", file.display()).blue());
    let context = extract_text(file)?;
    let mut session = ChatSession::new(context, &ctx.config);

    println!(
        "{}",
        "Haz preguntas sobre el documento. Escribe 'limpiar' para borrar el historial o 'salir' para terminar.".blue()
    );

    loop {
        let query = match Text::new("Pregunta:").prompt() {
            Ok(query) => query,
            // Esc o Ctrl+C terminan la conversación
            Err(_) => break,
        };
        let query = query.trim();

        if query.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&query.to_lowercase().as_str()) {
            break;
        }
        if query.eq_ignore_ascii_case(CLEAR_COMMAND) {
            session.clear();
            println!("{}", "Historial borrado.".yellow());
            continue;
        }

        match session.ask(&client, query) {
            Ok(answer) => println!("\n{}\n", answer),
            // Un fallo en una pregunta no termina la conversación
            Err(e) => println!("{}", format!("Error: {}", e).red()),
        }
    }

    println!("¡Hasta pronto!");

    Ok(())
}
