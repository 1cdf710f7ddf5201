//! Raw tabular data as read from the spreadsheet.

use std::io::Read;

/// A rectangular table: one header row plus data rows with optional cells.
///
/// Rows are padded to the header width so every column index is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Creates a table, padding short rows with missing cells.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, None);
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Decodes CSV with a header row.
    ///
    /// Empty or whitespace-only cells become `None`. Rows may be shorter or
    /// longer than the header row.
    ///
    /// # Errors
    ///
    /// Returns the decoder error on malformed input (e.g. invalid UTF-8).
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(cell_value).collect());
        }

        Ok(Self::new(headers, rows))
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
