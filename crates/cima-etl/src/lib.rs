//! # CIMA-ETL
//!
//! Batch pipeline over the CIMA infant motion-capture dataset: joins
//! per-subject keypoint CSV files with the dataset metadata table, derives
//! six planar joint-angle signals per frame, and writes the augmented
//! dataset back to a mirrored directory layout.

pub mod angles;
pub mod dataset;
pub mod metadata;
pub mod persist;
pub mod pipeline;

pub use pipeline::{CimaEtl, TINY_FILE_LIMIT};
