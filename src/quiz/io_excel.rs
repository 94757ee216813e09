use calamine::{open_workbook_auto, DataType, Reader};

use crate::quiz::{
    io_common::{simplify_file_name, DataSource, Row},
    *,
};

/// A worksheet of a spreadsheet file (xlsx, xls, xlsb, ods).
pub struct ExcelSource {
    path: String,
    sheet_name: Option<String>,
}

impl ExcelSource {
    pub fn new(path: &str, sheet_name: Option<String>) -> ExcelSource {
        ExcelSource {
            path: path.to_string(),
            sheet_name,
        }
    }
}

impl DataSource for ExcelSource {
    fn describe(&self) -> String {
        match &self.sheet_name {
            Some(s) => format!("{}!{}", simplify_file_name(&self.path), s),
            None => simplify_file_name(&self.path),
        }
    }

    fn read_rows(&mut self) -> QuizResult<Vec<Row>> {
        let mut workbook = open_workbook_auto(&self.path).context(OpeningSpreadsheetSnafu {
            path: self.path.clone(),
        })?;
        let wrange = match &self.sheet_name {
            Some(name) => {
                let available: Vec<String> = workbook.sheet_names().to_vec();
                workbook
                    .worksheet_range(name)
                    .context(MissingSheetSnafu {
                        path: self.path.clone(),
                        sheet: name.clone(),
                        available,
                    })?
                    .context(OpeningSpreadsheetSnafu {
                        path: self.path.clone(),
                    })?
            }
            None => workbook
                .worksheet_range_at(0)
                .context(EmptyWorkbookSnafu {
                    path: self.path.clone(),
                })?
                .context(OpeningSpreadsheetSnafu {
                    path: self.path.clone(),
                })?,
        };

        // Ranges start at the first used cell. Pad with empty rows and columns
        // so that row and column numbers match the ones of the sheet.
        let (start_row, start_col) = wrange.start().unwrap_or((0, 0));
        debug!(
            "read_rows: {}: range starts at {:?}",
            self.describe(),
            (start_row, start_col)
        );
        let mut res: Vec<Row> = (0..start_row).map(|_| Vec::new()).collect();
        for row in wrange.rows() {
            let mut cells: Row = (0..start_col).map(|_| Cell::Empty).collect();
            cells.extend(row.iter().map(read_cell));
            res.push(cells);
        }
        info!("read_rows: {}: {} rows", self.describe(), res.len());
        Ok(res)
    }
}

fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        // Dates and errors are not numbers for the leaderboard.
        other => Cell::Text(format!("{:?}", other)),
    }
}
