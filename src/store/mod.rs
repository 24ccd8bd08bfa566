/*!
The expression store.

An ordered, append-only set of records, each pairing a normalized expression with its simplification.
The store is the hand-off between simplification and verification, and lives for a single run.

The persisted form of a store is a CSV file with header `original,simplified` and exactly two fields in each row.
The mapping of each record is kept alongside the record, and persisted separately, as blocks of `A -> "original"` lines.

```rust
# use otter_simplify::store::{ExpressionRecord, ExpressionStore};
# use otter_simplify::normalizer::VariableMapping;
let mut store = ExpressionStore::default();
store.append(ExpressionRecord::new("A || B", "A || B"), VariableMapping::default());
store.append(ExpressionRecord::new("A && (B || !B)", "A"), VariableMapping::default());

let mut buffer = Vec::new();
store.write_records(&mut buffer).unwrap();
assert_eq!(
    String::from_utf8(buffer).unwrap(),
    "original,simplified\nA || B,A || B\nA && (B || !B),A\n"
);
```
*/

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{misc::log::targets, normalizer::VariableMapping, types::err::StoreError};

/// The header of the persisted form of a store.
pub const HEADER: [&str; 2] = ["original", "simplified"];

/// A normalized expression, paired with its simplification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionRecord {
    /// The normalized expression, in canonical syntax.
    pub original: String,

    /// The simplified expression, in canonical syntax.
    pub simplified: String,
}

impl ExpressionRecord {
    pub fn new(original: impl Into<String>, simplified: impl Into<String>) -> Self {
        ExpressionRecord {
            original: original.into(),
            simplified: simplified.into(),
        }
    }
}

impl std::fmt::Display for ExpressionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <=> {}", self.original, self.simplified)
    }
}

/// An ordered, append-only store of records, each with its mapping.
#[derive(Clone, Debug, Default)]
pub struct ExpressionStore {
    records: Vec<ExpressionRecord>,
    mappings: Vec<VariableMapping>,
}

fn io_error(path: &Path, error: impl std::fmt::Display) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

impl ExpressionStore {
    /// Appends `record`, with its mapping, returning the index of the record.
    pub fn append(&mut self, record: ExpressionRecord, mapping: VariableMapping) -> usize {
        log::trace!(target: targets::STORE, "Record {}: {record}", self.records.len());
        self.records.push(record);
        self.mappings.push(mapping);
        self.records.len() - 1
    }

    /// The store with `records` in place of its own, each keeping the mapping of the record it replaces.
    pub fn with_records(self, records: Vec<ExpressionRecord>) -> Result<Self, StoreError> {
        if records.len() != self.records.len() {
            return Err(StoreError::RecordCount {
                held: self.records.len(),
                read: records.len(),
            });
        }
        Ok(ExpressionStore {
            records,
            mappings: self.mappings,
        })
    }

    /// The records, in order of appending.
    pub fn records(&self) -> &[ExpressionRecord] {
        &self.records
    }

    /// The mapping of the record at `index`.
    pub fn mapping(&self, index: usize) -> Option<&VariableMapping> {
        self.mappings.get(index)
    }

    /// Pairs of record and mapping, in order of appending.
    pub fn iter(&self) -> impl Iterator<Item = (&ExpressionRecord, &VariableMapping)> {
        self.records.iter().zip(self.mappings.iter())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the records, in CSV form, to `writer`.
    pub fn write_records<W: Write>(&self, writer: W) -> Result<(), StoreError> {
        // The header is written explicitly, so an empty store still has a header.
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(HEADER)?;
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer
            .flush()
            .map_err(|e| StoreError::Csv(e.to_string()))
    }

    /// Writes the records, in CSV form, to the file at `path`.
    pub fn write_csv(&self, path: &Path) -> Result<(), StoreError> {
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        self.write_records(BufWriter::new(file))?;
        log::info!(target: targets::STORE, "{} records written to {}", self.len(), path.display());
        Ok(())
    }

    /// Writes the mapping of each record to the file at `path`.
    ///
    /// Each block begins with the index and original expression of the record, and blocks are separated by an empty line.
    pub fn write_mappings(&self, path: &Path) -> Result<(), StoreError> {
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        let mut writer = BufWriter::new(file);

        for (index, (record, mapping)) in self.iter().enumerate() {
            write!(writer, "# {index}: {}\n{mapping}\n", record.original)
                .map_err(|e| io_error(path, e))?;
        }
        writer.flush().map_err(|e| io_error(path, e))
    }

    /// The records in CSV form from `reader`.
    ///
    /// Rows are counted from 1, excluding the header.
    pub fn read_records<R: Read>(reader: R) -> Result<Vec<ExpressionRecord>, StoreError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.iter().ne(HEADER) {
            return Err(StoreError::Csv(format!(
                "expected header '{}', found '{}'",
                HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut records = Vec::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            if row.len() != HEADER.len() {
                return Err(StoreError::FieldCount {
                    row: index + 1,
                    found: row.len(),
                });
            }
            records.push(row.deserialize(Some(&headers))?);
        }
        Ok(records)
    }

    /// The records of the CSV file at `path`.
    pub fn read_csv(path: &Path) -> Result<Vec<ExpressionRecord>, StoreError> {
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        Self::read_records(file)
    }
}
