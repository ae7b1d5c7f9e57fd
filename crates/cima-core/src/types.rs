//! Fundamental types for the CIMA motion ETL.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Well-known keypoint column stems used by the angle definitions.
pub mod keypoint {
    pub const UPPER_CHEST: &str = "upper_chest";
    pub const NOSE: &str = "nose";
    pub const RIGHT_WRIST: &str = "right_wrist";
    pub const LEFT_WRIST: &str = "left_wrist";
    pub const HIP_CENTER: &str = "hip_center";
    pub const RIGHT_ANKLE: &str = "right_ankle";
    pub const LEFT_ANKLE: &str = "left_ankle";
}

/// Identifier for a recorded subject, derived from its file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    /// Derive an ID from a filename stem: the first 3 characters when the
    /// stem starts with a digit, otherwise the first 7 characters (the full
    /// stem when shorter).
    pub fn from_stem(stem: &str) -> Self {
        let take = if stem.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            3
        } else {
            7
        };
        Self(stem.chars().take(take).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 2D position in image-plane coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `other` to `self`.
    pub fn vector_from(&self, other: &Point2) -> Vector2<f64> {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

/// A named triplet of keypoints defining a planar joint angle: the angle at
/// `vertex` between the rays towards `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleTriplet {
    pub name: &'static str,
    pub from: &'static str,
    pub vertex: &'static str,
    pub to: &'static str,
}

/// The six derived joint angles, in output column order.
pub const ANGLE_TRIPLETS: [AngleTriplet; 6] = [
    AngleTriplet {
        name: "V1",
        from: keypoint::UPPER_CHEST,
        vertex: keypoint::NOSE,
        to: keypoint::RIGHT_WRIST,
    },
    AngleTriplet {
        name: "V2",
        from: keypoint::UPPER_CHEST,
        vertex: keypoint::NOSE,
        to: keypoint::LEFT_WRIST,
    },
    AngleTriplet {
        name: "V3",
        from: keypoint::UPPER_CHEST,
        vertex: keypoint::HIP_CENTER,
        to: keypoint::RIGHT_WRIST,
    },
    AngleTriplet {
        name: "V4",
        from: keypoint::UPPER_CHEST,
        vertex: keypoint::HIP_CENTER,
        to: keypoint::LEFT_WRIST,
    },
    AngleTriplet {
        name: "V5",
        from: keypoint::HIP_CENTER,
        vertex: keypoint::UPPER_CHEST,
        to: keypoint::RIGHT_ANKLE,
    },
    AngleTriplet {
        name: "V6",
        from: keypoint::HIP_CENTER,
        vertex: keypoint::UPPER_CHEST,
        to: keypoint::LEFT_ANKLE,
    },
];

/// Column-ordered numeric table holding one subject's frame sequence.
///
/// Columns keep their source order so a saved table reproduces the layout it
/// was read from, plus any appended columns at the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FrameTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Append a row. The caller must supply one value per column.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::ColumnLength {
                column: String::from("<row>"),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Read the 2D point of `keypoint_name` at `row` from its `_x`/`_y`
    /// column pair. Fails when either column is absent.
    pub fn point(&self, row: usize, keypoint_name: &str) -> Result<Point2> {
        let x = self.keypoint_value(row, keypoint_name, "x")?;
        let y = self.keypoint_value(row, keypoint_name, "y")?;
        Ok(Point2::new(x, y))
    }

    fn keypoint_value(&self, row: usize, keypoint_name: &str, axis: &str) -> Result<f64> {
        let column = format!("{keypoint_name}_{axis}");
        let idx = self
            .column_index(&column)
            .ok_or_else(|| Error::MissingColumn {
                column,
                context: String::from("frame table"),
            })?;
        self.value(row, idx).ok_or(Error::RowOutOfRange {
            row,
            rows: self.rows.len(),
        })
    }

    /// Append a column with one value per existing row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(Error::ColumnLength {
                column: name,
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }
}

/// One subject's motion-capture session joined with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: SubjectId,
    pub frames: FrameTable,
    /// Clinical label from the metadata `CP` column
    pub label: String,
    /// Capture frame rate from the metadata `FPS` column
    pub fps: f64,
}
