//! Raw row batches.
//!
//! A [`RowBatch`] is one bounded chunk of uninterpreted CSV cells: ordered
//! column names plus rows of raw strings. Type interpretation happens in
//! the engine, never at read time, so a batch can always be materialized
//! from any parseable CSV regardless of content.

use std::io::Read;

use tabval_core::Delimiter;

use crate::ValidateError;

/// A bounded in-memory batch of raw rows.
#[derive(Debug, Clone)]
pub struct RowBatch {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RowBatch {
    /// Creates an empty batch with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a batch from already-materialized rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Reads an entire CSV source eagerly into one batch.
    ///
    /// Used by the call sites that validate a whole file as a single
    /// chunk (CLI, federated entrypoint, tests). A parse failure anywhere
    /// in the file is a structural fault here, since nothing has been
    /// emitted yet.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: Delimiter) -> Result<Self, ValidateError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut batch = RowBatch::new(columns);
        for record in rdr.records() {
            let record = record?;
            batch.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(batch)
    }

    /// Appends one row. Short rows are allowed; missing cells read as
    /// absent during validation.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of rows in the batch.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the batch holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterates the rows as raw cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_csv_reader() {
        let csv = "id,age\n1,30\n2,45\n";
        let batch = RowBatch::from_csv_reader(csv.as_bytes(), Delimiter::Comma).unwrap();

        assert_eq!(batch.columns(), ["id", "age"]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.column_index("age"), Some(1));
        assert_eq!(batch.column_index("missing"), None);

        let rows: Vec<_> = batch.rows().collect();
        assert_eq!(rows[0], ["1", "30"]);
        assert_eq!(rows[1], ["2", "45"]);
    }

    #[test]
    fn test_from_csv_reader_semicolon() {
        let csv = "id;age\n1;30\n";
        let batch = RowBatch::from_csv_reader(csv.as_bytes(), Delimiter::Semicolon).unwrap();
        assert_eq!(batch.columns(), ["id", "age"]);
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_from_csv_reader_ragged_row_is_structural_fault() {
        let csv = "id,age\n1,30\n2,45,extra\n";
        let result = RowBatch::from_csv_reader(csv.as_bytes(), Delimiter::Comma);
        assert!(matches!(result, Err(ValidateError::Csv(_))));
    }

    #[test]
    fn test_empty_input_has_headers_only() {
        let csv = "id,age\n";
        let batch = RowBatch::from_csv_reader(csv.as_bytes(), Delimiter::Comma).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.columns().len(), 2);
    }
}
