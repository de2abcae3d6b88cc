//! FILENAME: core/report/tests/test_export.rs
//! End-to-end tests: load source data and a definition from disk, build the
//! engine, export every format into a temp directory and read it back.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use dataset::Dataset;
use pivot_engine::{PivotDefinition, PivotEngine, PivotError};
use report::{
    CsvRenderer, Download, HtmlRenderer, PdfRenderer, Renderer, ReportError, ReportOptions,
};

// ============================================================================
// FIXTURES
// ============================================================================

const SALES_JSON: &str = r#"[
    {"region": "A", "month": "Jan", "amount": 10},
    {"region": "A", "month": "Feb", "amount": 5},
    {"region": "B", "month": "Jan", "amount": 7}
]"#;

const DEFINITION_JSON: &str = r#"{
    "title": "Monthly Sales",
    "row_field": "region",
    "column_field": "month",
    "value_field": "amount"
}"#;

fn write_fixture(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn load_engine(dir: &Path) -> (PivotDefinition, PivotEngine) {
    let data_path = write_fixture(dir, "sales.json", SALES_JSON);
    let def_path = write_fixture(dir, "definition.json", DEFINITION_JSON);

    let dataset = Dataset::from_json_str(&fs::read_to_string(data_path).unwrap()).unwrap();
    let definition = PivotDefinition::from_json(&fs::read_to_string(def_path).unwrap()).unwrap();
    let engine = definition.build(dataset).unwrap();
    (definition, engine)
}

fn export_to_file(renderer: &dyn Renderer, title: &str, engine: &PivotEngine, path: &Path) {
    let mut writer = BufWriter::new(File::create(path).unwrap());
    renderer.render(title, engine, &mut writer).unwrap();
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_csv_file_export() {
    let dir = tempfile::tempdir().unwrap();
    let (definition, engine) = load_engine(dir.path());

    let path = dir.path().join("sales.csv");
    export_to_file(&CsvRenderer::default(), &definition.title, &engine, &path);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .unwrap();
    let rows: Vec<Vec<String>> = rdr
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();

    assert_eq!(
        rows,
        vec![
            vec!["", "Jan", "Feb", "total"],
            vec!["A", "10", "5", "15"],
            vec!["B", "7", "", "7"],
            vec!["Total", "17", "5", "22"],
        ]
    );
}

#[test]
fn test_html_and_pdf_file_export() {
    let dir = tempfile::tempdir().unwrap();
    let (definition, engine) = load_engine(dir.path());

    let html_path = dir.path().join("sales.html");
    export_to_file(&HtmlRenderer::default(), &definition.title, &engine, &html_path);
    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<h1>Monthly Sales</h1>"));
    assert!(html.contains(r#"<th class="data bottomRow">22</th>"#));

    let pdf_path = dir.path().join("sales.pdf");
    export_to_file(&PdfRenderer::default(), &definition.title, &engine, &pdf_path);
    let bytes = fs::read(&pdf_path).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_download_from_configured_options() {
    let dir = tempfile::tempdir().unwrap();
    let (definition, engine) = load_engine(dir.path());
    let options = ReportOptions::from_json(r#"{"csv": {"delimiter": 59}}"#).unwrap();

    let download = Download::csv(&definition.title, &engine, None, &options.csv).unwrap();
    assert_eq!(download.filename, "Monthly Sales.csv");

    let path = dir.path().join(&download.filename);
    let mut file = File::create(&path).unwrap();
    download.write_to(&mut file).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, ";Jan;Feb;total\nA;10;5;15\nB;7;;7\nTotal;17;5;22\n");
}

#[test]
fn test_csv_source_data() {
    let source = "region,month,amount\nA,Jan,10\nA,Feb,5\nB,Jan,7\nA,Jan,3\n";
    let dataset = Dataset::from_csv_reader(source.as_bytes(), b',').unwrap();
    let definition = PivotDefinition::from_json(DEFINITION_JSON).unwrap();
    let engine = definition.build(dataset).unwrap();

    assert_eq!(engine.cell_value("A", "Jan"), Some(10.0));
    assert_eq!(engine.total_for_row("A"), 18.0);

    let csv = String::from_utf8(CsvRenderer::default().to_bytes(&engine).unwrap()).unwrap();
    assert_eq!(csv, ",Jan,Feb,total\nA,10,5,18\nB,7,,7\nTotal,20,5,25\n");
}

#[test]
fn test_missing_field_surfaces_before_rendering() {
    let dataset = Dataset::from_json_str(r#"[{"region": "A", "amount": 1}]"#).unwrap();
    let definition = PivotDefinition::from_json(DEFINITION_JSON).unwrap();

    let err = definition.build(dataset).unwrap_err();
    assert!(matches!(err, PivotError::MissingField { record: 0, ref field } if field == "month"));

    let report_err: ReportError = err.into();
    assert!(report_err.to_string().contains("month"));
}

#[test]
fn test_write_failure_is_io_error() {
    struct FailingSink;

    impl std::io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let (definition, engine) = load_engine(dir.path());

    let err = HtmlRenderer::default()
        .render(&definition.title, &engine, &mut FailingSink)
        .unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));

    // The engine is untouched by the failed export.
    assert_eq!(engine.grand_total(), 22.0);
}

#[test]
fn test_csv_source_keeps_distinct_code_labels() {
    let source = "code,month,amount\n007,Jan,1\n7,Jan,2\n1.50,Feb,4\n";
    let dataset = Dataset::from_csv_reader(source.as_bytes(), b',').unwrap();
    let definition = PivotDefinition::from_json(
        r#"{"row_field": "code", "column_field": "month", "value_field": "amount"}"#,
    )
    .unwrap();
    let engine = definition.build(dataset).unwrap();

    let rows: Vec<String> = engine.row_labels().iter().map(|l| l.to_string()).collect();
    assert_eq!(rows, vec!["007", "7", "1.50"]);
    assert_eq!(engine.total_for_row("007"), 1.0);
    assert_eq!(engine.total_for_row("7"), 2.0);

    let csv = String::from_utf8(CsvRenderer::default().to_bytes(&engine).unwrap()).unwrap();
    assert_eq!(csv, ",Jan,Feb,total\n007,1,,1\n7,2,,2\n1.50,,4,4\nTotal,3,4,7\n");
}
