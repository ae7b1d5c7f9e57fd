//! Per-dataset metadata table: subject ID, clinical label, frame rate.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use cima_core::{Error, Result};

/// Typed view of one subject's metadata row.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMeta {
    /// Clinical label (`CP` column)
    pub label: String,
    /// Capture frame rate (`FPS` column)
    pub fps: f64,
}

/// The dataset's `metadata.csv`, kept verbatim for persistence plus a typed
/// index on the `ID` column.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, SubjectMeta>,
}

impl MetadataTable {
    pub const ID_COLUMN: &'static str = "ID";
    pub const LABEL_COLUMN: &'static str = "CP";
    pub const FPS_COLUMN: &'static str = "FPS";

    /// Load `metadata.csv` from `path`. Requires the `ID`, `CP` and `FPS`
    /// columns; a leading unnamed index column is dropped when present.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::MetadataRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = reader.headers()?.clone();
        let drop_first = headers
            .get(0)
            .is_some_and(|h| h.is_empty() || h == "Unnamed: 0");
        let skip = usize::from(drop_first);

        let columns: Vec<String> = headers.iter().skip(skip).map(String::from).collect();
        let column_index = |name: &str| -> Result<usize> {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| Error::MissingColumn {
                    column: name.to_string(),
                    context: path.display().to_string(),
                })
        };
        let id_idx = column_index(Self::ID_COLUMN)?;
        let label_idx = column_index(Self::LABEL_COLUMN)?;
        let fps_idx = column_index(Self::FPS_COLUMN)?;

        let mut rows = Vec::new();
        let mut index = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let row: Vec<String> = record.iter().skip(skip).map(String::from).collect();

            let id = row.get(id_idx).cloned().unwrap_or_default();
            let label = row.get(label_idx).cloned().unwrap_or_default();
            let fps_raw = row.get(fps_idx).cloned().unwrap_or_default();
            let fps = fps_raw
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::NumericParse {
                    column: Self::FPS_COLUMN.to_string(),
                    value: fps_raw,
                })?;

            // First row wins when an ID repeats.
            index.entry(id).or_insert(SubjectMeta { label, fps });
            rows.push(row);
        }

        Ok(Self {
            columns,
            rows,
            index,
        })
    }

    /// Look up a subject's label and frame rate by ID.
    pub fn get(&self, id: &str) -> Option<&SubjectMeta> {
        self.index.get(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table back out, all original columns in source order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
