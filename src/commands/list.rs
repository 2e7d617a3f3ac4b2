use colored::*;

use test_case_generator::utils::list_exports;
use test_case_generator::Result;

use super::AppContext;

/// Lista las hojas exportadas disponibles
pub fn list_exported_files(ctx: &AppContext) -> Result<()> {
    let files = list_exports(&ctx.config.output_dir)?;

    if files.is_empty() {
        println!(
            "{}",
            format!(
                "No hay exportaciones en {}.",
                ctx.config.output_dir.display()
            )
            .yellow()
        );
        return Ok(());
    }

    println!("{}", "Exportaciones disponibles:".green());
    for (i, file) in files.iter().enumerate() {
        println!("{}: {}", i + 1, file.display());
    }

    Ok(())
}
