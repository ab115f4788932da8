use std::{
    collections::HashSet,
    io::{Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::DatasetError;

/// A single table row. Missing values are `None`.
pub type Row = Vec<Option<String>>;

/// A small in-memory table of optional string cells, read from and written to CSV
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given column headers
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from headers and rows, checking that every row is as wide as the headers
    pub fn from_rows<S: Into<String>>(
        headers: impl IntoIterator<Item = S>,
        rows: Vec<Row>,
    ) -> Result<Self, DatasetError> {
        let mut table = Self::new(headers);

        for row in rows {
            table.push(row)?;
        }

        Ok(table)
    }

    /// Append a row
    pub fn push(&mut self, row: Row) -> Result<(), DatasetError> {
        if row.len() != self.headers.len() {
            return Err(DatasetError::RowWidth {
                expected: self.headers.len(),
                found: row.len(),
            });
        }

        self.rows.push(row);

        Ok(())
    }

    /// The column headers, in order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows, in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// A single row
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Position of the named column
    pub fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    /// The cells of the named column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>, DatasetError> {
        let index = self.column_index(name)?;

        Ok(self.rows.iter().map(|row| row[index].as_deref()).collect())
    }

    /// Rename columns according to `(from, to)` pairs. Unknown names are ignored.
    pub fn rename(&mut self, renames: &[(&str, &str)]) {
        for header in self.headers.iter_mut() {
            if let Some((_, to)) = renames.iter().find(|(from, _)| *from == header.as_str()) {
                *header = (*to).to_string();
            }
        }
    }

    /// Flags each row that exactly repeats an earlier row
    pub fn duplicated(&self) -> Vec<bool> {
        let mut seen = HashSet::with_capacity(self.rows.len());

        self.rows.iter().map(|row| !seen.insert(row)).collect()
    }

    /// Number of rows where every cell is missing
    pub fn empty_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.iter().all(Option::is_none))
            .count()
    }

    /// Keep only the first `len` rows. Shorter tables are left as they are.
    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
    }

    /// Remove exact duplicate rows, keeping the first occurrence
    pub fn drop_duplicates(&mut self) {
        let mut seen = HashSet::with_capacity(self.rows.len());

        self.rows.retain(|row| seen.insert(row.clone()));
    }

    /// Read a table from CSV. Empty fields become missing values.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(DatasetError::NotTabular("no header row found".to_string()));
        }

        let mut table = Self::new(headers);

        for record in reader.records() {
            let record = record.map_err(|e| DatasetError::NotTabular(e.to_string()))?;

            let row = record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect();

            table.push(row)?;
        }

        Ok(table)
    }

    /// Read a table from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;

        Self::from_reader(file)
    }

    /// Write the table as CSV. Missing values become empty fields.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut writer = csv::Writer::from_writer(writer);

        writer.write_record(&self.headers)?;

        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }

        writer.flush()?;

        Ok(())
    }

    /// Write the table to a CSV file, creating parent directories as needed
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), DatasetError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::File::create(path)?;

        self.to_writer(file)
    }
}
