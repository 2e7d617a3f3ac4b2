mod commands;

use clap::{Parser, Subcommand};
use colored::*;
use inquire::{Select, Text};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use commands::{
    chat_about_document, generate_test_cases, list_exported_files, parse_saved_response,
    AppContext,
};
use test_case_generator::config::Config;
use test_case_generator::Result;

#[derive(Parser)]
#[command(author, version, about = "Genera casos de prueba a partir de documentos", long_about = None)]
struct Cli {
    /// Archivo de configuración (por defecto testgen.toml si existe)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Clave de la API de Groq
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Modelo a utilizar
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Carpeta donde se guardan las exportaciones
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Mostrar los registros de diagnóstico
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generar casos de prueba a partir de un documento (pdf, docx o txt) y exportarlos a CSV
    Generate {
        /// Ruta al documento
        #[arg(short, long)]
        file: PathBuf,

        /// Nombre base de los archivos exportados
        #[arg(short, long)]
        name: Option<String>,

        /// Instrucción adicional para el modelo
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Analizar una respuesta del modelo guardada en un archivo y exportarla a CSV
    Parse {
        /// Ruta al archivo con la respuesta, o '-' para leer de la entrada estándar
        #[arg(short, long)]
        input: PathBuf,

        /// Nombre base de los archivos exportados
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Hacer preguntas sobre un documento
    Chat {
        /// Ruta al documento
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Listar las hojas CSV exportadas
    List,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

/// Los registros van a stderr; RUST_LOG tiene prioridad sobre --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let ctx = AppContext {
        config,
        api_key: cli.api_key,
    };

    match cli.command {
        Some(Commands::Generate { file, name, query }) => {
            generate_test_cases(&ctx, &file, name, query)
        }
        Some(Commands::Parse { input, name }) => parse_saved_response(&ctx, &input, name),
        Some(Commands::Chat { file }) => chat_about_document(&ctx, &file),
        Some(Commands::List) => list_exported_files(&ctx),
        None => interactive_menu(&ctx),
    }
}

/// Menú interactivo si no se proporciona un comando
fn interactive_menu(ctx: &AppContext) -> Result<()> {
    let options = vec![
        "Generar casos de prueba",
        "Analizar respuesta guardada",
        "Chatear sobre un documento",
        "Listar exportaciones",
        "Salir",
    ];

    let selection = Select::new("¿Qué deseas hacer?", options).prompt();

    match selection {
        Ok("Generar casos de prueba") => {
            if let Some(file) = prompt_path("Ruta al documento (pdf, docx o txt):") {
                let name = Text::new("Nombre de la exportación (opcional):")
                    .prompt()
                    .ok();
                generate_test_cases(ctx, &file, name, None)?
            }
        }
        Ok("Analizar respuesta guardada") => {
            if let Some(input) = prompt_path("Ruta al archivo con la respuesta:") {
                parse_saved_response(ctx, &input, None)?
            }
        }
        Ok("Chatear sobre un documento") => {
            if let Some(file) = prompt_path("Ruta al documento (pdf, docx o txt):") {
                chat_about_document(ctx, &file)?
            }
        }
        Ok("Listar exportaciones") => list_exported_files(ctx)?,
        _ => println!("¡Hasta pronto!"),
    }

    Ok(())
}

fn prompt_path(message: &str) -> Option<PathBuf> {
    let path = Text::new(message).prompt().ok()?;
    let path = path.trim();

    if path.is_empty() {
        println!("{}", "Operación cancelada.".yellow());
        return None;
    }

    if !Path::new(path).exists() {
        println!("{}", format!("El archivo {} no existe.", path).red());
        return None;
    }

    Some(PathBuf::from(path))
}
