use tracing::{debug, info};

use crate::constants::{MUNICIPALITY_CAR_MARKER, NEIGHBORHOOD_CAR_MARKER};
use crate::domain::StatRecord;
use crate::error::{EnrichError, Result};
use crate::tables::{parse_decimal, TableLayout};

/// Layout of one car-ownership export plus where its code and value live.
#[derive(Debug)]
pub struct CarTableLayout {
    pub table: TableLayout,
    pub code_column: usize,
    pub value_column: usize,
    /// The neighborhood export pads its code cells with whitespace.
    pub trim_code: bool,
}

/// Municipality export: name, code, average cars per household.
pub const MUNICIPALITY_CAR_LAYOUT: CarTableLayout = CarTableLayout {
    table: TableLayout {
        header_row: 2,
        header_marker: MUNICIPALITY_CAR_MARKER,
        trim_marker: false,
        columns: 3,
        data_start: 3,
        stop_column: 1,
    },
    code_column: 1,
    value_column: 2,
    trim_code: false,
};

/// Neighborhood export: six cells with two spares, value in the fifth.
pub const NEIGHBORHOOD_CAR_LAYOUT: CarTableLayout = CarTableLayout {
    table: TableLayout {
        header_row: 2,
        header_marker: NEIGHBORHOOD_CAR_MARKER,
        trim_marker: true,
        columns: 6,
        data_start: 3,
        stop_column: 1,
    },
    code_column: 1,
    value_column: 4,
    trim_code: true,
};

/// Attaches car-ownership values to already-parsed income records, matching
/// on administrative code. A row whose code has no income record is fatal; a
/// value cell that does not parse leaves the record without car-ownership
/// data, since coverage is intentionally partial in the source.
pub fn attach_car_ownership(
    layout: &CarTableLayout,
    file: &str,
    lines: &[String],
    records: &mut [StatRecord],
) -> Result<()> {
    layout.table.validate_marker(file, lines)?;

    let mut attached = 0usize;
    for row in layout.table.data_rows(file, lines)? {
        let code = row.cells[layout.code_column];
        let code = if layout.trim_code { code.trim() } else { code };
        let record = records
            .iter_mut()
            .find(|record| record.code == code)
            .ok_or_else(|| EnrichError::RecordNotFound {
                file: file.to_string(),
                name: row.cells[0].trim().to_string(),
                code: code.to_string(),
            })?;
        match parse_decimal(row.cells[layout.value_column]) {
            Some(value) => {
                record.car_ownership = Some(value);
                attached += 1;
            }
            None => debug!(
                "no car-ownership value for {} ({})",
                record.name, record.code
            ),
        }
    }

    info!("{}: attached car-ownership to {} records", file, attached);
    Ok(())
}
