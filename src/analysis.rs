//! Reconstruction error metrics.

use crate::{
    error::{Degeneracy, Error},
    math::Axis,
    points::PointSet,
};


/// Error metrics between an original and a reconstructed point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorReport {
    /// Mean squared difference over all points and axes.
    pub mse: f64,

    /// Mean absolute difference over all points and axes.
    pub mae: f64,

    /// Mean squared difference for each axis.
    pub per_axis_mse: [f64; 3],
}

impl ErrorReport {
    pub fn axis_mse(&self, axis: Axis) -> f64 {
        self.per_axis_mse[axis.index()]
    }
}

/// Compares `original` and `reconstructed` point by point.
///
/// Both sets must have the same, non-zero length. A length mismatch means
/// that some stage of the pipeline did not preserve the point order, which
/// is a bug.
pub fn compute_errors(original: &PointSet, reconstructed: &PointSet) -> Result<ErrorReport, Error> {
    if original.len() != reconstructed.len() {
        return Err(Error::DimensionMismatch {
            original: original.len(),
            reconstructed: reconstructed.len(),
        });
    }
    if original.is_empty() {
        return Err(Degeneracy::Empty.into());
    }

    let mut squared = [0.0; 3];
    let mut absolute = 0.0;
    for (a, b) in original.iter().zip(reconstructed) {
        let d = *a - *b;
        for i in 0..3 {
            squared[i] += d[i] * d[i];
            absolute += d[i].abs();
        }
    }

    let n = original.len() as f64;
    let per_axis_mse = [squared[0] / n, squared[1] / n, squared[2] / n];

    Ok(ErrorReport {
        mse: squared.iter().sum::<f64>() / (3.0 * n),
        mae: absolute / (3.0 * n),
        per_axis_mse,
    })
}
