//! Writing the augmented dataset back to disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use cima_core::{FrameTable, Result, SubjectId, SubjectRecord};

use crate::metadata::MetadataTable;

/// Default output directory name, under the dataset root.
pub const DEFAULT_OUTPUT_NAME: &str = "CIMA_Transformed";

/// Write `metadata.csv` plus one `data/<id>.csv` per subject under
/// `<root>/<name>/`. Existing files are overwritten; partial output from an
/// earlier failure stays on disk.
pub fn save_dataset(
    root: &Path,
    name: &str,
    metadata: &MetadataTable,
    subjects: &HashMap<SubjectId, SubjectRecord>,
) -> Result<()> {
    let out_dir = root.join(name);
    let data_dir = out_dir.join("data");
    fs::create_dir_all(&data_dir)?;

    metadata.save(&out_dir.join("metadata.csv"))?;

    for (id, record) in subjects {
        let path = data_dir.join(format!("{id}.csv"));
        write_frame_table(&path, &record.frames)?;
    }
    Ok(())
}

/// Write a frame table as CSV, columns in table order. NaN cells are written
/// empty, mirroring how the loader reads them.
pub fn write_frame_table(path: &Path, table: &FrameTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;

    let mut cells = Vec::with_capacity(table.n_columns());
    for row in table.rows() {
        cells.clear();
        for value in row {
            if value.is_nan() {
                cells.push(String::new());
            } else {
                cells.push(value.to_string());
            }
        }
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_frame_table;

    #[test]
    fn test_frame_table_roundtrip() {
        let mut table = FrameTable::new(vec![
            String::from("nose_x"),
            String::from("nose_y"),
            String::from("V1"),
        ]);
        table.push_row(vec![1.5, -2.25, 0.5]).unwrap();
        table.push_row(vec![f64::NAN, 4.0, 3.125]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("001.csv");
        write_frame_table(&path, &table).unwrap();

        let reloaded = load_frame_table(&path).unwrap();
        assert_eq!(reloaded.columns(), table.columns());
        assert_eq!(reloaded.n_rows(), table.n_rows());
        assert_eq!(reloaded.value(0, 0), Some(1.5));
        assert_eq!(reloaded.value(0, 2), Some(0.5));
        assert!(reloaded.value(1, 0).unwrap().is_nan());
        assert_eq!(reloaded.value(1, 1), Some(4.0));
    }

    #[test]
    fn test_save_dataset_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("metadata.csv"), "ID,CP,FPS\nabc,0,30\n").unwrap();
        let metadata = MetadataTable::load(&dir.path().join("metadata.csv")).unwrap();

        let mut frames = FrameTable::new(vec![String::from("nose_x")]);
        frames.push_row(vec![1.0]).unwrap();
        let id = SubjectId(String::from("abc"));
        let mut subjects = HashMap::new();
        subjects.insert(
            id.clone(),
            SubjectRecord {
                id,
                frames,
                label: String::from("0"),
                fps: 30.0,
            },
        );

        save_dataset(dir.path(), "out", &metadata, &subjects).unwrap();

        assert!(dir.path().join("out/metadata.csv").is_file());
        assert!(dir.path().join("out/data/abc.csv").is_file());
    }
}
