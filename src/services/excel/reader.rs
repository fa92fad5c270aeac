use super::types::{Cell, Sheet, Workbook};
use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use crate::error::AppError;

/// Decodes xlsx bytes into the engine's workbook model, keeping sheet order.
pub fn read_workbook(file_data: Bytes) -> Result<Workbook, AppError> {
    let start = std::time::Instant::now();
    let cursor = Cursor::new(file_data);

    let mut xlsx: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e| {
            tracing::error!("Failed to open Excel file: {}", e);
            AppError::WorkbookError(format!("Failed to open Excel file: {}", e))
        })?;

    let sheet_names = xlsx.sheet_names().to_vec();
    tracing::info!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let mut workbook = Workbook::new();
    for sheet_name in &sheet_names {
        match xlsx.worksheet_range(sheet_name) {
            Ok(range) => {
                tracing::debug!("Read sheet {} ({} rows)", sheet_name, range.height());
                workbook.add_sheet(sheet_name.clone(), sheet_from_range(&range));
            }
            Err(e) => {
                tracing::warn!("Failed to read worksheet {}: {}", sheet_name, e);
            }
        }
    }

    tracing::info!("Workbook decoded in {:?}", start.elapsed());
    Ok(workbook)
}

/// calamine trims ranges to the used area; pad back to absolute coordinates
/// so row and column indexes match what the author sees in the sheet.
pub fn sheet_from_range(range: &Range<Data>) -> Sheet {
    let Some((start_row, start_col)) = range.start() else {
        return Sheet::default();
    };

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }

    Sheet::new(rows)
}

pub fn cell_from_data(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(true) => Cell::text("true"),
        Data::Bool(false) => Cell::Empty,
        Data::DateTime(d) => Cell::Number(d.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}
