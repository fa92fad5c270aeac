use crate::services::excel::Sheet;

/// Only the top of a month tab is searched for section headers.
pub const HEADER_SCAN_ROWS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Revenue,
    Expense,
}

impl SectionKind {
    /// Whether an uppercased, trimmed cell opens this section.
    pub fn is_section_header(self, marker: &str) -> bool {
        match self {
            SectionKind::Revenue => marker.contains("CLIENTES/ENTRADA") || marker == "CLIENTES",
            SectionKind::Expense => marker.contains("SAÍDA MENSAL") || marker == "SAÍDAS",
        }
    }

    /// Whether an uppercased name repeats a header and is not a data row.
    pub fn is_header_echo(self, marker: &str) -> bool {
        match self {
            SectionKind::Revenue => {
                marker.contains("CLIENTES") || marker.contains("ENTRADA") || marker.contains("VALOR")
            }
            SectionKind::Expense => {
                marker.contains("SAÍDA") || marker.contains("VALOR") || marker == "CLIENTES"
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Revenue => "revenue",
            SectionKind::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLocation {
    pub header_row: usize,
    pub name_col: usize,
    pub value_col: usize,
    pub status_col: usize,
}

/// Strategy for finding where a section lives inside a month tab.
pub trait SectionLayout: Send + Sync {
    fn locate(&self, sheet: &Sheet, kind: SectionKind) -> Option<SectionLocation>;
}

/// Finds the section by its header label, then looks for `VALOR` and
/// `STATUS` labels on the header row or the one right below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderScanLayout;

impl SectionLayout for HeaderScanLayout {
    fn locate(&self, sheet: &Sheet, kind: SectionKind) -> Option<SectionLocation> {
        let (header_row, name_col) = sheet
            .rows()
            .iter()
            .take(HEADER_SCAN_ROWS)
            .enumerate()
            .find_map(|(r, row)| {
                row.iter()
                    .position(|cell| kind.is_section_header(&cell.marker_text()))
                    .map(|c| (r, c))
            })?;

        let label_rows = [sheet.row(header_row), sheet.row(header_row + 1)];
        let label_cells = label_rows.into_iter().flatten().flat_map(|row| row.iter().enumerate());

        let mut value_col = None;
        let mut status_col = None;
        for (idx, cell) in label_cells {
            let label = cell.marker_text();
            if value_col.is_none() && label.contains("VALOR") {
                value_col = Some(idx);
            }
            if status_col.is_none() && label.contains("STATUS") {
                status_col = Some(idx);
            }
        }

        let location = SectionLocation {
            header_row,
            name_col,
            value_col: value_col.unwrap_or(name_col + 1),
            status_col: status_col.unwrap_or(name_col + 2),
        };
        tracing::debug!("Located {} section at {:?}", kind.as_str(), location);
        Some(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: Vec<Vec<&str>>) -> Sheet {
        Sheet::from_rows(rows)
    }

    #[test]
    fn finds_labels_on_the_header_row() {
        let s = sheet(vec![vec!["CLIENTES", "VALOR", "STATUS"], vec!["Acme", "10", "PAGO"]]);
        let loc = HeaderScanLayout.locate(&s, SectionKind::Revenue).unwrap();
        assert_eq!(
            loc,
            SectionLocation { header_row: 0, name_col: 0, value_col: 1, status_col: 2 }
        );
    }

    #[test]
    fn finds_labels_on_the_row_below() {
        let s = sheet(vec![
            vec!["", "", "", "", ""],
            vec!["", "", "", "SAÍDA MENSAL - JANEIRO", ""],
            vec!["", "STATUS", "", "DESCRIÇÃO", "VALOR PAGO"],
        ]);
        let loc = HeaderScanLayout.locate(&s, SectionKind::Expense).unwrap();
        assert_eq!(loc.header_row, 1);
        assert_eq!(loc.name_col, 3);
        assert_eq!(loc.value_col, 4);
        assert_eq!(loc.status_col, 1);
    }

    #[test]
    fn header_row_labels_win_over_next_row() {
        let s = sheet(vec![
            vec!["CLIENTES/ENTRADA", "", "", "VALOR"],
            vec!["", "VALOR", "STATUS", ""],
        ]);
        let loc = HeaderScanLayout.locate(&s, SectionKind::Revenue).unwrap();
        assert_eq!(loc.value_col, 3);
        assert_eq!(loc.status_col, 2);
    }

    #[test]
    fn missing_labels_fall_back_to_adjacent_columns() {
        let s = sheet(vec![vec!["", "  saídas  "], vec!["", "Aluguel", "1.000"]]);
        let loc = HeaderScanLayout.locate(&s, SectionKind::Expense).unwrap();
        assert_eq!(
            loc,
            SectionLocation { header_row: 0, name_col: 1, value_col: 2, status_col: 3 }
        );
    }

    #[test]
    fn exact_match_markers_do_not_match_substrings() {
        let s = sheet(vec![vec!["CLIENTES NOVOS", "SAÍDAS EXTRAS"]]);
        assert!(HeaderScanLayout.locate(&s, SectionKind::Revenue).is_none());
        assert!(HeaderScanLayout.locate(&s, SectionKind::Expense).is_none());
    }

    #[test]
    fn headers_below_the_scan_window_are_ignored() {
        let mut rows = vec![vec!["x"]; HEADER_SCAN_ROWS];
        rows.push(vec!["CLIENTES"]);
        assert!(HeaderScanLayout.locate(&sheet(rows), SectionKind::Revenue).is_none());
    }

    #[test]
    fn earliest_row_then_column_wins() {
        let s = sheet(vec![
            vec!["", "", "CLIENTES"],
            vec!["CLIENTES", "", ""],
        ]);
        let loc = HeaderScanLayout.locate(&s, SectionKind::Revenue).unwrap();
        assert_eq!((loc.header_row, loc.name_col), (0, 2));
    }
}
