//! Per-frame joint-angle derivation.

use cima_core::{planar_angle, FrameTable, Result, ANGLE_TRIPLETS};

/// Append the six derived angle columns `V1..V6` to `frames`, in place.
///
/// For each frame and each triplet, the angle at the vertex keypoint between
/// the rays towards the two endpoint keypoints, unsigned, in `[0, π]`.
/// Frames with NaN keypoint coordinates yield NaN angles; a missing keypoint
/// column fails the whole derivation.
pub fn derive_angles(frames: &mut FrameTable) -> Result<()> {
    for triplet in &ANGLE_TRIPLETS {
        let mut values = Vec::with_capacity(frames.n_rows());
        for row in 0..frames.n_rows() {
            let p0 = frames.point(row, triplet.from)?;
            let p1 = frames.point(row, triplet.vertex)?;
            let p2 = frames.point(row, triplet.to)?;

            let vec1 = p0.vector_from(&p1);
            let vec2 = p2.vector_from(&p1);
            values.push(planar_angle(&vec1, &vec2));
        }
        frames.push_column(triplet.name, values)?;
    }
    Ok(())
}
