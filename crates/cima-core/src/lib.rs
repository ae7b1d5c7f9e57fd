//! # CIMA-Core
//!
//! Core types and planar geometry for the CIMA infant motion-capture
//! ETL: subject records, frame tables, and joint-angle definitions.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
