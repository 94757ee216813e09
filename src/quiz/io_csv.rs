// Primitives for reading CSV files.

use std::io::Read;

use crate::quiz::{
    io_common::{simplify_file_name, DataSource, Row},
    *,
};

pub struct CsvSource {
    path: String,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(path: &str) -> CsvSource {
        let delimiter = if path.to_lowercase().ends_with(".tsv") {
            b'\t'
        } else {
            b','
        };
        CsvSource {
            path: path.to_string(),
            delimiter,
        }
    }
}

impl DataSource for CsvSource {
    fn describe(&self) -> String {
        simplify_file_name(&self.path)
    }

    fn read_rows(&mut self) -> QuizResult<Vec<Row>> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .context(CsvOpenSnafu {
                path: self.path.clone(),
            })?;
        read_records(rdr)
    }
}

/// Reads CSV content from any reader. The header is kept as the first row.
pub fn read_csv_rows<R: Read>(input: R, delimiter: u8) -> QuizResult<Vec<Row>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(input);
    read_records(rdr)
}

fn read_records<R: Read>(rdr: csv::Reader<R>) -> QuizResult<Vec<Row>> {
    let mut res: Vec<Row> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The index starts at 1 to respect most conventions in the excel world
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let row: Row = line.iter().map(read_cell).collect();
        debug!("read_records: lineno: {:?} row: {:?}", lineno, &row);
        res.push(row);
    }
    Ok(res)
}

// CSV files do not carry types: everything is text, and the library reads numbers out of it.
fn read_cell(s: &str) -> Cell {
    if s.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(s.to_string())
    }
}
