use colored::*;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use test_case_generator::{Result, TestSuite};

use super::{base_name, export_suite, AppContext};

/// Analiza una respuesta del modelo guardada en un archivo (o `-` para stdin)
pub fn parse_saved_response(ctx: &AppContext, input: &Path, name: Option<String>) -> Result<()> {
    let from_stdin = input == Path::new("-");
    let response = if from_stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    println!(
        "{}",
        format!("Analizando respuesta de {} caracteres...", response.chars().count()).blue()
    );

    let suite = TestSuite::from_response(&response);

    let source = if from_stdin { Path::new("response") } else { input };

    export_suite(ctx, &base_name(name, source), &suite)
}
