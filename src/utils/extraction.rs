use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Extrae el texto de un documento PDF, DOCX o TXT
pub fn extract_text(path: &Path) -> Result<String> {
    info!("Extrayendo texto de {}", path.display());

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => extract_pdf_text(path)?,
        "docx" => docx_lite::extract_text(path).map_err(|e| Error::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        "txt" => fs::read_to_string(path)?,
        _ => return Err(Error::UnsupportedFileType(extension)),
    };

    if text.trim().is_empty() {
        return Err(Error::EmptyDocument(path.to_path_buf()));
    }

    info!("Se extrajeron {} caracteres", text.chars().count());

    Ok(text)
}

/// El lector de PDF puede entrar en pánico con archivos dañados; el pánico
/// se devuelve como un error de extracción
fn extract_pdf_text(path: &Path) -> Result<String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)));

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        Err(_) => {
            warn!("El lector de PDF falló con {}", path.display());
            Err(Error::Extraction {
                path: path.to_path_buf(),
                message: "el lector de PDF falló al procesar el archivo".to_string(),
            })
        }
    }
}
