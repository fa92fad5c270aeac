use super::number::normalize;
use crate::models::AnnualSummary;
use crate::services::excel::{Cell, Sheet, Workbook};

/// Columns to the right of a label searched for its figure.
const LOOKAHEAD_COLUMNS: usize = 4;

/// First sheet whose uppercased name mentions the cash tab.
pub fn find_summary_sheet(workbook: &Workbook) -> Option<(&str, &Sheet)> {
    workbook.sheets().find(|(name, _)| {
        let name = name.to_uppercase();
        name.contains("CAIXA") || name.contains("RESUMO")
    })
}

/// Reads the totals reported on the cash tab.
///
/// Every matching label is honored in scan order, so a label further down the
/// sheet overwrites one found earlier. Inflow and outflow are reassigned even
/// when no figure follows the label; the balance only when one does.
pub fn extract_summary(workbook: &Workbook) -> Option<AnnualSummary> {
    let (sheet_name, sheet) = find_summary_sheet(workbook)?;
    tracing::debug!("Reading annual summary from sheet {}", sheet_name);

    let mut summary = AnnualSummary::default();
    for row in sheet.rows() {
        for (idx, cell) in row.iter().enumerate() {
            let label = cell.marker_text();
            if label.is_empty() {
                continue;
            }

            if label.contains("ENTRADA TOTAL") || label.contains("TOTAL ENTRADAS") {
                summary.total_inflow = value_after(row, idx);
            }
            if label.contains("SAÍDA TOTAL") || label.contains("TOTAL SAÍDAS") {
                summary.total_outflow = value_after(row, idx);
            }
            if label.contains("VALOR ATUAL") || label.contains("SALDO") || label.contains("CAIXA") {
                let value = value_after(row, idx);
                if value != 0.0 {
                    summary.current_balance = value;
                }
            }
        }
    }

    Some(summary)
}

fn value_after(row: &[Cell], idx: usize) -> f64 {
    row.iter()
        .skip(idx + 1)
        .take(LOOKAHEAD_COLUMNS)
        .map(normalize)
        .find(|v| *v != 0.0)
        .unwrap_or(0.0)
}
