use tracing::info;

use crate::constants::COUNTRY_MARKER;
use crate::domain::{RegionLevel, StatRecord};
use crate::error::{EnrichError, Result};
use crate::tables::{parse_decimal, Row, TableLayout};

/// Layout of the income export (2020 income figures on 2023 region codes).
/// The preamble runs through line 12; the country aggregate doubles as the
/// marker row.
pub const INCOME_LAYOUT: TableLayout = TableLayout {
    header_row: 13,
    header_marker: COUNTRY_MARKER,
    trim_marker: false,
    columns: 6,
    data_start: 13,
    stop_column: 5,
};

/// The income export bucketed by geography level.
#[derive(Debug)]
pub struct IncomeTable {
    pub country: StatRecord,
    pub municipalities: Vec<StatRecord>,
    pub neighborhoods: Vec<StatRecord>,
}

impl IncomeTable {
    pub fn records(&self, level: RegionLevel) -> &[StatRecord] {
        match level {
            RegionLevel::Municipality => &self.municipalities,
            RegionLevel::Neighborhood => &self.neighborhoods,
        }
    }

    pub fn records_mut(&mut self, level: RegionLevel) -> &mut [StatRecord] {
        match level {
            RegionLevel::Municipality => &mut self.municipalities,
            RegionLevel::Neighborhood => &mut self.neighborhoods,
        }
    }
}

/// Parses the income export. Rows with a nonempty first cell are
/// municipalities; rows with a blank first cell belong to the neighborhood
/// grouping underneath their municipality, with the code in the second cell.
pub fn parse_income_table(file: &str, lines: &[String]) -> Result<IncomeTable> {
    INCOME_LAYOUT.validate_marker(file, lines)?;

    let mut rows = INCOME_LAYOUT.data_rows(file, lines)?.into_iter();
    // data starts on the marker row, so the first row is the country aggregate
    let country = match rows.next() {
        Some(row) => to_record(file, &row)?,
        None => {
            return Err(EnrichError::EmptyTable {
                file: file.to_string(),
            })
        }
    };

    let mut municipalities = Vec::new();
    let mut neighborhoods = Vec::new();
    for row in rows {
        let record = to_record(file, &row)?;
        if !row.cells[0].is_empty() {
            municipalities.push(record);
        } else {
            neighborhoods.push(record);
        }
    }

    info!(
        "{}: 1 country, {} municipality and {} neighborhood records",
        file,
        municipalities.len(),
        neighborhoods.len()
    );

    Ok(IncomeTable {
        country,
        municipalities,
        neighborhoods,
    })
}

fn to_record(file: &str, row: &Row) -> Result<StatRecord> {
    let code = if row.cells[0].is_empty() {
        row.cells[1]
    } else {
        row.cells[0]
    };
    Ok(StatRecord {
        code: code.to_string(),
        name: row.cells[2].to_string(),
        average_income: income_cell(file, row, 3)?,
        pct_low_income: income_cell(file, row, 4)?,
        pct_high_income: income_cell(file, row, 5)?,
        car_ownership: None,
    })
}

fn income_cell(file: &str, row: &Row, column: usize) -> Result<f64> {
    parse_decimal(row.cells[column]).ok_or_else(|| EnrichError::Numeral {
        file: file.to_string(),
        line: row.index,
        cell: row.cells[column].to_string(),
    })
}
