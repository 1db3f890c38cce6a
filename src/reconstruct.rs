//! Inverting a normalization.

use crate::{
    error::Error,
    normalize::NormalizationParams,
    points::PointSet,
};


/// Maps normalized (usually dequantized) coordinates back into the original
/// frame, using the strategy that produced `params`.
///
/// - min-max: `p * (max - min) + min`
/// - unit-sphere: `p * radius + centroid`
pub fn reconstruct(normalized: &PointSet, params: &NormalizationParams) -> Result<PointSet, Error> {
    params.method().normalizer().denormalize(normalized, params)
}
