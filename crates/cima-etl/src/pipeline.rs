//! The linear ETL pipeline: load metadata, join frame files, derive angles,
//! persist.

use std::collections::HashMap;
use std::path::PathBuf;

use cima_core::{Error, Result, SubjectId, SubjectRecord};
use tracing::{debug, info, warn};

use crate::angles::derive_angles;
use crate::dataset::{discover_csv_files, load_frame_table, subject_id_for};
use crate::metadata::MetadataTable;
use crate::persist::save_dataset;

/// Tiny mode processes only this many discovered files.
pub const TINY_FILE_LIMIT: usize = 5;

/// Batch ETL over one dataset root.
///
/// Owns the subject collection for its whole lifetime; the stages run as a
/// strict sequence: `load_metadata` (implied by `load`), `load`,
/// `create_angles`, optionally `save`.
pub struct CimaEtl {
    root: PathBuf,
    metadata: Option<MetadataTable>,
    subjects: HashMap<SubjectId, SubjectRecord>,
    missing_metadata: Vec<SubjectId>,
}

impl CimaEtl {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            metadata: None,
            subjects: HashMap::new(),
            missing_metadata: Vec::new(),
        }
    }

    /// Read `<root>/<dataset>/metadata.csv`. Fails when the file is absent
    /// or malformed.
    pub fn load_metadata(&mut self, dataset: &str) -> Result<()> {
        let path = self.root.join(dataset).join("metadata.csv");
        let table = MetadataTable::load(&path)?;
        info!(rows = table.len(), path = %path.display(), "metadata loaded");
        self.metadata = Some(table);
        Ok(())
    }

    /// Discover and load every frame CSV for `dataset`, joining each file
    /// against the metadata table by derived subject ID.
    ///
    /// Files whose ID has no metadata row are skipped and recorded in
    /// [`missing_metadata`](Self::missing_metadata). With `tiny`, only the
    /// first [`TINY_FILE_LIMIT`] discovered files are processed.
    pub fn load(&mut self, dataset: &str, tiny: bool) -> Result<()> {
        self.load_metadata(dataset)?;
        let metadata = self.metadata.as_ref().ok_or(Error::MetadataNotLoaded)?;

        let dataset_dir = self.root.join(dataset);
        let data_dir = dataset_dir.join("data");
        let search_dir = if data_dir.exists() {
            data_dir
        } else {
            dataset_dir
        };

        let mut files = discover_csv_files(&search_dir)?;
        if tiny {
            files.truncate(TINY_FILE_LIMIT);
        }
        info!(files = files.len(), dir = %search_dir.display(), "loading frame files");

        for file in &files {
            let id = subject_id_for(file);
            let Some(meta) = metadata.get(id.as_str()) else {
                warn!(%id, file = %file.display(), "no metadata row, skipping");
                self.missing_metadata.push(id);
                continue;
            };

            let frames = load_frame_table(file)?;
            debug!(%id, frames = frames.n_rows(), "loaded subject");

            if self.subjects.contains_key(&id) {
                warn!(%id, file = %file.display(), "duplicate subject id, overwriting");
            }
            self.subjects.insert(
                id.clone(),
                SubjectRecord {
                    id,
                    frames,
                    label: meta.label.clone(),
                    fps: meta.fps,
                },
            );
        }

        info!(
            subjects = self.subjects.len(),
            unmatched = self.missing_metadata.len(),
            "dataset loaded"
        );
        Ok(())
    }

    /// Derive the six angle columns for every loaded subject, in place.
    pub fn create_angles(&mut self) -> Result<()> {
        info!(subjects = self.subjects.len(), "deriving angles");
        for record in self.subjects.values_mut() {
            derive_angles(&mut record.frames)?;
            debug!(id = %record.id, "angles derived");
        }
        Ok(())
    }

    /// The in-memory subject collection.
    pub fn subjects(&self) -> &HashMap<SubjectId, SubjectRecord> {
        &self.subjects
    }

    /// Subject IDs that had a frame file but no metadata row.
    pub fn missing_metadata(&self) -> &[SubjectId] {
        &self.missing_metadata
    }

    pub fn metadata(&self) -> Option<&MetadataTable> {
        self.metadata.as_ref()
    }

    /// Persist the metadata table and every subject's (augmented) frame
    /// sequence under `<root>/<name>/`.
    pub fn save(&self, name: &str) -> Result<()> {
        let metadata = self.metadata.as_ref().ok_or(Error::MetadataNotLoaded)?;
        info!(subjects = self.subjects.len(), name, "saving dataset");
        save_dataset(&self.root, name, metadata, &self.subjects)
    }
}
