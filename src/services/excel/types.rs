use std::borrow::Cow;

/// A single spreadsheet cell as seen by the ingestion engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Blank cells carry nothing usable as a name or status: empty,
    /// empty text, or a numeric zero.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// String rendering of the cell, numbers printed without a trailing `.0`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// Uppercased, trimmed text used by every keyword match.
    pub fn marker_text(&self) -> String {
        self.as_text().trim().to_uppercase()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// Rectangular-ish grid of cells; rows may be ragged, missing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&[Cell]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Ordered collection of named sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<(String, Sheet)>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: impl Into<String>, sheet: Sheet) {
        self.sheets.push((name.into(), sheet));
    }

    pub fn with_sheet(mut self, name: impl Into<String>, sheet: Sheet) -> Self {
        self.add_sheet(name, sheet);
        self
    }

    /// Exact, case-sensitive lookup.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|(sheet_name, _)| sheet_name == name)
            .map(|(_, sheet)| sheet)
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> {
        self.sheets.iter().map(|(name, sheet)| (name.as_str(), sheet))
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

pub fn cell_at(row: &[Cell], col: usize) -> &Cell {
    static EMPTY: Cell = Cell::Empty;
    row.get(col).unwrap_or(&EMPTY)
}
