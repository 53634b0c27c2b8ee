//! In-memory workbook model.
//!
//! Every cell is held as text. Values are coerced once, when the source
//! workbook is read, and written back out verbatim.

/// A workbook: its sheets in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spreadsheet {
    /// Sheets, in the order they appear in the source workbook.
    pub sheets: Vec<Sheet>,
}

impl Spreadsheet {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet names in order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// One named sheet: a rectangular block of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// Zero-based (row, column) of the block's top-left cell in the sheet
    pub origin: (u32, u32),
    /// Row-major cell text; the first row is the header row
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create an empty sheet anchored at A1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the top-left anchor of the cell block.
    pub fn with_origin(mut self, row: u32, col: u32) -> Self {
        self.origin = (row, col);
        self
    }

    /// Append a row of cell text.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// The header row, if the sheet has any data.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Text at a position relative to the block origin.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Check if the sheet has no non-empty cells.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(String::is_empty)
    }
}
