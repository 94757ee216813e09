use std::path::Path;

use crate::quiz::*;

pub type Row = Vec<Cell>;

/// Anything that can hand over the rows of a sheet.
///
/// The rows include the headers; `data_rows` drops them.
pub trait DataSource {
    /// A short description of the source, for messages.
    fn describe(&self) -> String;

    fn read_rows(&mut self) -> QuizResult<Vec<Row>>;
}

/// A source kept in memory. Mostly useful for tests.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    rows: Vec<Row>,
}

impl MemorySource {
    pub fn new(name: &str, rows: Vec<Row>) -> MemorySource {
        MemorySource {
            name: name.to_string(),
            rows,
        }
    }
}

impl DataSource for MemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn read_rows(&mut self) -> QuizResult<Vec<Row>> {
        Ok(self.rows.clone())
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The rows starting at `first_row`. The index starts at 1 to respect the conventions of spreadsheets.
pub fn data_rows(rows: &[Row], first_row: usize) -> &[Row] {
    let skip = first_row.saturating_sub(1).min(rows.len());
    &rows[skip..]
}

pub fn cell_at(row: &[Cell], idx: usize) -> Cell {
    row.get(idx).cloned().unwrap_or(Cell::Empty)
}

/// Parses a column reference: Excel-style letters (`A`, `c`, `AB`) or a number starting at 1.
/// Returns the index starting at 0.
pub fn column_index(s: &str) -> QuizResult<usize> {
    let t = s.trim();
    if let Ok(i) = t.parse::<usize>() {
        if i >= 1 {
            return Ok(i - 1);
        }
        return InvalidColumnSnafu { column: t }.fail();
    }
    if t.is_empty() || !t.chars().all(|c| c.is_ascii_alphabetic()) || t.len() > 3 {
        return InvalidColumnSnafu { column: t }.fail();
    }
    let idx = t
        .to_ascii_uppercase()
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + (b - b'A' + 1) as usize);
    Ok(idx - 1)
}

/// Opens the source matching the extension of the file.
pub fn open_source(path: &str, sheet_name: Option<String>) -> QuizResult<Box<dyn DataSource>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    info!("Attempting to read {:?}", path);
    match extension.as_deref() {
        Some("csv") | Some("tsv") | Some("txt") => {
            if sheet_name.is_some() {
                warn!("open_source: {}: sheet names are ignored for csv files", path);
            }
            Ok(Box::new(io_csv::CsvSource::new(path)))
        }
        Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
            Ok(Box::new(io_excel::ExcelSource::new(path, sheet_name)))
        }
        _ => UnsupportedInputSnafu { path }.fail(),
    }
}
