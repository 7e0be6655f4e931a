use std::fs;
use std::path::Path;

use crate::error::{EnrichError, Result};

pub mod car_ownership;
pub mod income;

/// Fixed layout of one semicolon-delimited CBS export. The exports are
/// spreadsheet dumps with a preamble of title rows, a marker cell at a known
/// position, a fixed cell count per row and a trailing blank region instead
/// of a row count.
#[derive(Debug, Clone)]
pub struct TableLayout {
    /// Line index whose first cell must read `header_marker`.
    pub header_row: usize,
    pub header_marker: &'static str,
    /// Whether the marker cell is whitespace-padded in the export.
    pub trim_marker: bool,
    /// Exact cell count of every row from `data_start` on.
    pub columns: usize,
    /// Line index of the first data row.
    pub data_start: usize,
    /// Column whose emptiness marks the end of the table.
    pub stop_column: usize,
}

/// One data row, with its original line index for diagnostics.
#[derive(Debug)]
pub struct Row<'a> {
    pub index: usize,
    pub cells: Vec<&'a str>,
}

impl TableLayout {
    /// Asserts the header marker is where this layout expects it. This guards
    /// against upstream spreadsheet layout drift and runs before any row
    /// processing.
    pub fn validate_marker(&self, file: &str, lines: &[String]) -> Result<()> {
        let first_cell = lines
            .get(self.header_row)
            .map(|line| line.split(';').next().unwrap_or(""))
            .unwrap_or("");
        let first_cell = if self.trim_marker {
            first_cell.trim()
        } else {
            first_cell
        };
        if first_cell != self.header_marker {
            return Err(EnrichError::HeaderMarker {
                file: file.to_string(),
                line: self.header_row,
                marker: self.header_marker,
            });
        }
        Ok(())
    }

    /// Splits the data region into rows, enforcing the exact cell count and
    /// stopping at the first row whose stop cell is empty.
    pub fn data_rows<'a>(&self, file: &str, lines: &'a [String]) -> Result<Vec<Row<'a>>> {
        let mut rows = Vec::new();
        for (index, line) in lines.iter().enumerate().skip(self.data_start) {
            let cells: Vec<&str> = line.split(';').collect();
            if cells.len() != self.columns {
                return Err(EnrichError::ColumnCount {
                    file: file.to_string(),
                    line: index,
                    expected: self.columns,
                    found: cells.len(),
                    content: line.clone(),
                });
            }
            if cells[self.stop_column].is_empty() {
                break;
            }
            rows.push(Row { index, cells });
        }
        Ok(rows)
    }
}

/// Reads a whole export and splits it into lines, dropping the carriage
/// returns of the Windows Excel exports.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).map_err(|source| EnrichError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

/// Parses a locale-formatted numeral cell: the exports use a comma as the
/// fractional separator. Returns `None` for anything that does not come out
/// as a finite number, such as the `.` placeholder cells.
pub fn parse_decimal(cell: &str) -> Option<f64> {
    cell.replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
