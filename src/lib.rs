//! Generación de casos de prueba a partir de documentos con un modelo de lenguaje.
//!
//! El flujo es: texto del documento → respuesta del modelo → [`parse_response`]
//! → [`expand_steps`] → hoja CSV.
//!
//! Cada exportación guarda tres archivos: la hoja de pasos en CSV, un resumen
//! en CSV y un informe en Markdown. No se generan libros `.xlsx`.

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use error::{Error, Result};
pub use parser::{expand_steps, parse_response};
pub use pipeline::{generate_suite, TestSuite};
