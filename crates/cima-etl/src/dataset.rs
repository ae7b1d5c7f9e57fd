//! Discovery and loading of per-subject frame CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use cima_core::{Error, FrameTable, Result, SubjectId};

/// Recursively collect every `.csv` file under `dir`.
///
/// Order follows directory traversal and is not guaranteed stable across
/// filesystems.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_csv_files(dir, &mut files)?;
    Ok(files)
}

fn collect_csv_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_csv_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    Ok(())
}

/// Derive the subject ID for a frame file from its filename stem.
pub fn subject_id_for(path: &Path) -> SubjectId {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    SubjectId::from_stem(&stem)
}

/// Load one subject's frame sequence.
///
/// A leading unnamed index column (or pandas' `Unnamed: 0`) is dropped when
/// present. Empty cells become NaN; any other non-numeric cell is an error.
pub fn load_frame_table(path: &Path) -> Result<FrameTable> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let headers = reader.headers()?.clone();
    let drop_first = headers
        .get(0)
        .is_some_and(|h| h.is_empty() || h == "Unnamed: 0");
    let skip = usize::from(drop_first);

    let columns: Vec<String> = headers.iter().skip(skip).map(String::from).collect();
    let mut table = FrameTable::new(columns);

    for record in reader.records() {
        let record = record?;
        let mut row = Vec::with_capacity(table.n_columns());
        for (i, cell) in record.iter().skip(skip).enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                row.push(f64::NAN);
            } else {
                let value = cell.parse::<f64>().map_err(|_| Error::NumericParse {
                    column: table
                        .columns()
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| i.to_string()),
                    value: cell.to_string(),
                })?;
                row.push(value);
            }
        }
        table.push_row(row)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(path: &Path, contents: &str) {
        let mut f = File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_discover_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_file(&dir.path().join("a.csv"), "x\n1\n");
        write_file(&dir.path().join("nested/b.csv"), "x\n1\n");
        write_file(&dir.path().join("notes.txt"), "ignored");

        let mut names: Vec<String> = discover_csv_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_subject_id_from_path() {
        assert_eq!(
            subject_id_for(Path::new("/data/001_trial.csv")).as_str(),
            "001"
        );
        assert_eq!(
            subject_id_for(Path::new("/data/control_a.csv")).as_str(),
            "control"
        );
    }

    #[test]
    fn test_load_drops_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("001.csv");
        write_file(&path, "Unnamed: 0,nose_x,nose_y\n0,1.0,2.0\n1,3.0,4.0\n");

        let table = load_frame_table(&path).unwrap();
        assert_eq!(table.columns(), ["nose_x", "nose_y"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.value(1, 0), Some(3.0));
    }

    #[test]
    fn test_load_without_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("001.csv");
        write_file(&path, "nose_x,nose_y\n1.0,2.0\n");

        let table = load_frame_table(&path).unwrap();
        assert_eq!(table.columns(), ["nose_x", "nose_y"]);
        assert_eq!(table.n_rows(), 1);
    }

    #[test]
    fn test_load_empty_cell_is_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("001.csv");
        write_file(&path, "nose_x,nose_y\n,2.0\n");

        let table = load_frame_table(&path).unwrap();
        assert!(table.value(0, 0).unwrap().is_nan());
        assert_eq!(table.value(0, 1), Some(2.0));
    }

    #[test]
    fn test_load_bad_cell_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("001.csv");
        write_file(&path, "nose_x,nose_y\nleft,2.0\n");

        let err = load_frame_table(&path).unwrap_err();
        assert!(matches!(err, Error::NumericParse { .. }));
    }
}
