use chrono::{DateTime, Local};
use csv::WriterBuilder;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::models::{StepRow, TestCase, TestCaseRecord};
use crate::parser::expand_steps;

/// Encabezados de la hoja de pasos, en el orden de las columnas
pub const STEP_ROW_HEADERS: [&str; 9] = [
    "Test Case ID",
    "Test Case Title",
    "Description",
    "Preconditions",
    "Step Number",
    "Test Step",
    "Expected Result",
    "Screenshot",
    "Test Data",
];

/// Encabezados de la tabla a nivel de caso
pub const TEST_CASE_HEADERS: [&str; 8] = [
    "Test Case ID",
    "Test Case Title",
    "Description",
    "Preconditions",
    "Test Steps",
    "Expected Result",
    "Test Data",
    "Module/Feature",
];

/// Resumen de una exportación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub total_test_cases: usize,
    pub total_test_steps: usize,
    pub generated_on: String,
}

impl ExportSummary {
    pub fn new(test_cases: &[TestCase], rows: &[StepRow], generated_on: DateTime<Local>) -> Self {
        Self {
            total_test_cases: test_cases.len(),
            total_test_steps: rows.len(),
            generated_on: generated_on.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Archivos creados por una exportación
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub sheet: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
}

/// Escribe la hoja de pasos en CSV, con encabezados aunque no haya filas
pub fn write_step_rows<W: Write>(writer: W, rows: &[StepRow]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(STEP_ROW_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}

/// Escribe un caso por fila, con los pasos en una sola celda
pub fn write_test_cases<W: Write>(writer: W, test_cases: &[TestCase]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(TEST_CASE_HEADERS)?;
    for test_case in test_cases {
        writer.serialize(TestCaseRecord::from(test_case))?;
    }

    writer.flush()?;

    Ok(())
}

pub fn write_summary<W: Write>(writer: W, summary: &ExportSummary) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["Metric", "Value"])?;
    writer.write_record(["Total Test Cases", summary.total_test_cases.to_string().as_str()])?;
    writer.write_record(["Total Test Steps", summary.total_test_steps.to_string().as_str()])?;
    writer.write_record(["Generated On", summary.generated_on.as_str()])?;

    writer.flush()?;

    Ok(())
}

/// Escribe el informe en Markdown con el resumen y los pasos de cada caso
pub fn write_markdown_report<W: Write>(
    mut writer: W,
    test_cases: &[TestCase],
    summary: &ExportSummary,
    title: &str,
) -> Result<()> {
    writeln!(writer, "# Casos de Prueba: {}", title)?;
    writeln!(writer, "\nFecha de generación: {}\n", summary.generated_on)?;

    writeln!(writer, "## Resumen\n")?;
    writeln!(writer, "- Total de casos: {}", summary.total_test_cases)?;
    writeln!(writer, "- Total de pasos: {}\n", summary.total_test_steps)?;

    writeln!(writer, "## Detalle de Casos de Prueba\n")?;
    for test_case in test_cases {
        writeln!(writer, "### {} - {}\n", test_case.id, test_case.title)?;
        writeln!(writer, "- **Módulo**: {}", test_case.module)?;

        // Solo mostrar prioridad y tipo si el modelo los indicó
        if let Some(priority) = &test_case.priority {
            writeln!(writer, "- **Prioridad**: {}", priority)?;
        }
        if let Some(test_type) = &test_case.test_type {
            writeln!(writer, "- **Tipo**: {}", test_type)?;
        }

        writeln!(writer, "- **Descripción**: {}", inline(&test_case.description))?;
        writeln!(writer, "- **Precondiciones**: {}", inline(&test_case.preconditions))?;
        writeln!(writer, "- **Datos de prueba**: {}\n", inline(&test_case.test_data))?;

        let rows = expand_steps(std::slice::from_ref(test_case));
        if rows.is_empty() {
            writeln!(writer, "_Sin pasos definidos._\n")?;
            continue;
        }

        writeln!(writer, "| # | Paso | Resultado esperado |")?;
        writeln!(writer, "|---|------|--------------------|")?;
        for row in &rows {
            writeln!(
                writer,
                "| {} | {} | {} |",
                row.step_number,
                table_cell(&row.step_text),
                table_cell(&row.expected_result)
            )?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;

    Ok(())
}

/// Guarda la hoja CSV, el resumen CSV y el informe Markdown en `output_dir`.
///
/// Nunca sobrescribe una exportación anterior: si el nombre con la fecha ya
/// existe se le añade `-1`, `-2`... Si ningún caso tiene pasos se guarda la
/// tabla a nivel de caso, para que la hoja nunca quede vacía.
pub fn export_test_cases(
    output_dir: &Path,
    base_name: &str,
    test_cases: &[TestCase],
    rows: &[StepRow],
) -> Result<ExportPaths> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    let now = Local::now();
    let export_name = unique_export_name(
        output_dir,
        &format!("{}-{}", base_name, now.format(TIMESTAMP_FORMAT)),
    );
    let paths = ExportPaths {
        sheet: output_dir.join(format!("{}.csv", export_name)),
        summary: output_dir.join(format!("{}-summary.csv", export_name)),
        report: output_dir.join(format!("{}.md", export_name)),
    };
    let summary = ExportSummary::new(test_cases, rows, now);

    let sheet = BufWriter::new(create_new_file(&paths.sheet)?);
    if rows.is_empty() {
        info!("No hay pasos que expandir, se exporta la tabla de casos");
        write_test_cases(sheet, test_cases)?;
    } else {
        write_step_rows(sheet, rows)?;
    }

    write_summary(BufWriter::new(create_new_file(&paths.summary)?), &summary)?;
    write_markdown_report(
        BufWriter::new(create_new_file(&paths.report)?),
        test_cases,
        &summary,
        &export_name,
    )?;

    info!(
        "Exportados {} casos y {} pasos en {}",
        summary.total_test_cases,
        summary.total_test_steps,
        paths.sheet.display()
    );

    Ok(paths)
}

/// Obtiene las hojas exportadas en `output_dir`, las más recientes primero
pub fn list_exports(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !output_dir.exists() {
        return Ok(files);
    }

    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        let is_csv = path.extension().map_or(false, |ext| ext == "csv");
        let is_summary = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map_or(false, |stem| stem.ends_with("-summary"));

        if path.is_file() && is_csv && !is_summary {
            files.push(path);
        }
    }

    // Ordenar por fecha (más recientes primero), los que no tienen fecha al final
    files.sort_by(|a, b| {
        export_sort_key(b)
            .cmp(&export_sort_key(a))
            .then_with(|| a.cmp(b))
    });

    Ok(files)
}

/// Nombre de exportación libre en `output_dir`: `stem`, o `stem-1`, `stem-2`...
fn unique_export_name(output_dir: &Path, stem: &str) -> String {
    let is_taken = |name: &str| {
        [
            format!("{}.csv", name),
            format!("{}-summary.csv", name),
            format!("{}.md", name),
        ]
        .iter()
        .any(|file| output_dir.join(file).exists())
    };

    if !is_taken(stem) {
        return stem.to_string();
    }

    let mut counter = 1;
    loop {
        let candidate = format!("{}-{}", stem, counter);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Crea el archivo sin sobrescribir uno existente
fn create_new_file(path: &Path) -> Result<File> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;

    Ok(file)
}

/// Fecha y número de secuencia de un nombre `base-AAAAMMDD_HHMMSS[-N].csv`
fn export_sort_key(path: &Path) -> Option<(String, u32)> {
    let stem = path.file_stem()?.to_str()?;
    let mut parts = stem.rsplit('-');
    let last = parts.next()?;

    if is_timestamp(last) {
        return Some((last.to_string(), 0));
    }

    let sequence = last.parse::<u32>().ok()?;
    let timestamp = parts.next().filter(|part| is_timestamp(part))?;

    Some((timestamp.to_string(), sequence))
}

fn is_timestamp(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 8 || b.is_ascii_digit())
}

fn inline(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_case(id: &str, test_steps: &str) -> TestCase {
        TestCase {
            id: id.to_string(),
            title: "Login".to_string(),
            description: "User logs in".to_string(),
            preconditions: "1. Account exists\n2. Network up".to_string(),
            test_steps: test_steps.to_string(),
            expected_result: "Home page".to_string(),
            test_data: "user@example.com".to_string(),
            module: "Auth".to_string(),
            priority: Some("High".to_string()),
            test_type: None,
        }
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    #[test]
    fn step_sheet_has_headers_and_one_line_per_row() {
        let cases = [sample_case("TC001", "Open app\nVerify login shown")];
        let rows = expand_steps(&cases);
        let mut buffer = Vec::new();

        write_step_rows(&mut buffer, &rows).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, STEP_ROW_HEADERS);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "TC001");
        assert_eq!(&records[0][4], "1");
        assert_eq!(&records[0][8], "user@example.com");
        assert_eq!(&records[1][0], "");
        assert_eq!(&records[1][6], "**Add screenshot here\nHome page");
        assert_eq!(&records[1][7], "");
    }

    #[test]
    fn empty_step_sheet_still_has_headers() {
        let mut buffer = Vec::new();

        write_step_rows(&mut buffer, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.trim_end(), STEP_ROW_HEADERS.join(","));
    }

    #[test]
    fn test_case_table_uses_case_headers() {
        let mut buffer = Vec::new();

        write_test_cases(&mut buffer, &[sample_case("TC009", "")]).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        assert_eq!(reader.headers().unwrap().get(7), Some("Module/Feature"));
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "TC009");
        assert_eq!(&record[7], "Auth");
    }

    #[test]
    fn summary_lists_totals_and_date() {
        let cases = [sample_case("TC001", "a\nb\nc"), sample_case("TC002", "d")];
        let rows = expand_steps(&cases);
        let summary = ExportSummary::new(&cases, &rows, fixed_time());
        let mut buffer = Vec::new();

        write_summary(&mut buffer, &summary).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Total Test Cases,2"));
        assert!(text.contains("Total Test Steps,4"));
        assert!(text.contains("Generated On,2024-05-17 09:30:00"));
    }

    #[test]
    fn markdown_report_lists_cases_and_steps() {
        let cases = [
            sample_case("TC001", "Open app\nCheck | banner"),
            sample_case("TC002", ""),
        ];
        let rows = expand_steps(&cases);
        let summary = ExportSummary::new(&cases, &rows, fixed_time());
        let mut buffer = Vec::new();

        write_markdown_report(&mut buffer, &cases, &summary, "login").unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Casos de Prueba: login"));
        assert!(text.contains("- Total de pasos: 2"));
        assert!(text.contains("### TC001 - Login"));
        assert!(text.contains("- **Prioridad**: High"));
        assert!(!text.contains("- **Tipo**"));
        assert!(text.contains("- **Precondiciones**: 1. Account exists; 2. Network up"));
        assert!(text.contains("| 2 | Check \\| banner | **Add screenshot here<br>Home page |"));
        assert!(text.contains("_Sin pasos definidos._"));
    }

    #[test]
    fn export_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("exports");
        let cases = [sample_case("TC001", "Open app")];
        let rows = expand_steps(&cases);

        let paths = export_test_cases(&output_dir, "login", &cases, &rows).unwrap();

        assert!(paths.sheet.exists());
        assert!(paths.summary.exists());
        assert!(paths.report.exists());
        assert_eq!(paths.sheet.extension().unwrap(), "csv");
        assert_eq!(paths.summary.extension().unwrap(), "csv");
        assert_eq!(paths.report.extension().unwrap(), "md");
        let sheet = fs::read_to_string(&paths.sheet).unwrap();
        assert!(sheet.starts_with("Test Case ID,Test Case Title"));
        assert!(sheet.contains("Step Number"));
    }

    #[test]
    fn export_without_steps_writes_case_table() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [sample_case("TC001", "\n\n")];

        let paths = export_test_cases(dir.path(), "empty", &cases, &[]).unwrap();

        let sheet = fs::read_to_string(&paths.sheet).unwrap();
        assert!(sheet.contains("Module/Feature"));
        assert!(sheet.contains("TC001"));
    }

    #[test]
    fn list_exports_skips_summaries_and_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "login-20240101_100000.csv",
            "login-20240101_100000-summary.csv",
            "login-20240301_100000.csv",
            "login-20240301_100000.md",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }

        let files = list_exports(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["login-20240301_100000.csv", "login-20240101_100000.csv"]
        );
    }

    #[test]
    fn export_twice_with_same_name_keeps_both_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let first_cases = [sample_case("TC001", "Open app")];
        let second_cases = [sample_case("TC777", "Close app")];

        let first = export_test_cases(
            dir.path(),
            "login",
            &first_cases,
            &expand_steps(&first_cases),
        )
        .unwrap();
        let second = export_test_cases(
            dir.path(),
            "login",
            &second_cases,
            &expand_steps(&second_cases),
        )
        .unwrap();

        assert_ne!(first.sheet, second.sheet);
        assert_ne!(first.summary, second.summary);
        assert_ne!(first.report, second.report);
        let first_sheet = fs::read_to_string(&first.sheet).unwrap();
        assert!(first_sheet.contains("TC001"));
        assert!(!first_sheet.contains("TC777"));
        assert!(fs::read_to_string(&second.sheet).unwrap().contains("TC777"));
        assert_eq!(list_exports(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn taken_export_name_gets_a_counter() {
        let dir = tempfile::tempdir().unwrap();
        let stem = "login-20240101_100000";
        assert_eq!(unique_export_name(dir.path(), stem), stem);

        File::create(dir.path().join("login-20240101_100000.md")).unwrap();
        assert_eq!(
            unique_export_name(dir.path(), stem),
            "login-20240101_100000-1"
        );

        File::create(dir.path().join("login-20240101_100000-1.csv")).unwrap();
        assert_eq!(
            unique_export_name(dir.path(), stem),
            "login-20240101_100000-2"
        );
    }

    #[test]
    fn list_exports_orders_by_date_across_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "zeta-20240101_100000.csv",
            "alpha-20250101_100000.csv",
            "alpha-20250101_100000-1.csv",
            "alpha-20250101_100000-1-summary.csv",
            "mid-range-20240601_080000.csv",
            "notes.csv",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }

        let files = list_exports(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "alpha-20250101_100000-1.csv",
                "alpha-20250101_100000.csv",
                "mid-range-20240601_080000.csv",
                "zeta-20240101_100000.csv",
                "notes.csv",
            ]
        );
    }

    #[test]
    fn sort_key_reads_timestamp_and_counter() {
        assert_eq!(
            export_sort_key(Path::new("a-20240101_100000.csv")),
            Some(("20240101_100000".to_string(), 0))
        );
        assert_eq!(
            export_sort_key(Path::new("a-20240101_100000-3.csv")),
            Some(("20240101_100000".to_string(), 3))
        );
        assert_eq!(export_sort_key(Path::new("report-2.csv")), None);
        assert_eq!(export_sort_key(Path::new("notes.csv")), None);
    }

    #[test]
    fn list_exports_of_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        assert!(list_exports(&dir.path().join("missing")).unwrap().is_empty());
    }
}
