use super::locator::{SectionKind, SectionLocation};
use super::number::normalize;
use crate::services::excel::{cell_at, Cell, Sheet};

pub const DEFAULT_STATUS: &str = "PENDENTE";

/// Columns to the right of the name searched when the value column is empty.
const VALUE_FALLBACK_SPAN: usize = 4;

/// A data row of a section before it is tied to a month and numbered.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub name: String,
    pub amount: f64,
    pub status: String,
}

pub fn extract(sheet: &Sheet, location: &SectionLocation, kind: SectionKind) -> Vec<RawRecord> {
    sheet
        .rows()
        .iter()
        .enumerate()
        .skip(location.header_row + 1)
        .filter_map(|(row_idx, row)| {
            let record = extract_row(row, location, kind)?;
            tracing::trace!("{} row {}: {:?}", kind.as_str(), row_idx, record);
            Some(record)
        })
        .collect()
}

fn extract_row(row: &[Cell], location: &SectionLocation, kind: SectionKind) -> Option<RawRecord> {
    let name_cell = cell_at(row, location.name_col);
    if name_cell.is_blank() {
        return None;
    }

    let name = name_cell.as_text().trim().to_string();
    if name.is_empty() || kind.is_header_echo(&name.to_uppercase()) {
        return None;
    }

    let amount = normalize(value_cell(row, location));

    let status_cell = cell_at(row, location.status_col);
    let status = if status_cell.is_blank() {
        DEFAULT_STATUS.to_string()
    } else {
        status_cell.as_text().trim().to_string()
    };

    // Named rows survive at zero; stray short tokens do not.
    if amount == 0.0 && name.chars().count() <= 2 {
        return None;
    }

    Some(RawRecord { name, amount, status })
}

fn value_cell<'a>(row: &'a [Cell], location: &SectionLocation) -> &'a Cell {
    let cell = cell_at(row, location.value_col);
    if !cell.is_empty() && normalize(cell) != 0.0 {
        return cell;
    }

    let first = location.name_col + 1;
    let end = (first + VALUE_FALLBACK_SPAN).min(row.len());
    row.get(first..end)
        .and_then(|candidates| candidates.iter().find(|c| normalize(c) != 0.0))
        .unwrap_or(cell)
}
