//! Mapping raw coordinates into a bounded reference frame.
//!
//! There are two strategies, both implementing [`Normalizer`]:
//!
//! - [`MinMax`] rescales every axis independently into `[0, 1]`.
//! - [`UnitSphere`] centers the points on their centroid and scales them by
//!   the largest distance to it, so that they fit into the unit sphere.
//!
//! Each strategy returns [`NormalizationParams`] which contain everything
//! [`Normalizer::denormalize`] needs to invert the mapping. Call sites only
//! go through the trait (see [`Method::normalizer`]), so a new strategy does
//! not touch them.

use std::{fmt, str::FromStr};

use cgmath::prelude::*;
use derive_more::Display;

use crate::{
    error::{Degeneracy, Error},
    math::{Axis, Pos3, map_axes},
    points::{BoundingBox, PointSet},
    quantize::Domain,
};


/// Identifies one of the normalization strategies.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    #[display(fmt = "minmax")]
    MinMax,
    #[display(fmt = "unitsphere")]
    UnitSphere,
}

impl Method {
    /// All methods, in the order in which the pipeline runs them by default.
    pub const ALL: [Method; 2] = [Method::MinMax, Method::UnitSphere];

    /// Returns the strategy implementing this method.
    pub fn normalizer(self) -> &'static dyn Normalizer {
        match self {
            Method::MinMax => &MinMax,
            Method::UnitSphere => &UnitSphere,
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "minmax" => Ok(Method::MinMax),
            "unitsphere" => Ok(Method::UnitSphere),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }
}


/// A strategy that maps a point set into a bounded range in an invertible
/// way.
pub trait Normalizer {
    /// The method this strategy implements.
    fn method(&self) -> Method;

    /// The per-component range normalized coordinates lie in.
    fn domain(&self) -> Domain;

    /// Normalizes all points.
    ///
    /// Degenerate inputs (see [`Degeneracy`]) are reported as errors rather
    /// than producing NaN or infinite coordinates.
    fn normalize(&self, points: &PointSet) -> Result<Normalized, Error>;

    /// Maps normalized (usually dequantized) coordinates back into the
    /// original frame. Fails if `params` were produced by another method.
    fn denormalize(
        &self,
        normalized: &PointSet,
        params: &NormalizationParams,
    ) -> Result<PointSet, Error>;
}

/// The output of a [`Normalizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub points: PointSet,
    pub params: NormalizationParams,
}

/// Strategy specific data that is sufficient to invert a normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizationParams {
    MinMax {
        min: Pos3,
        max: Pos3,
    },
    UnitSphere {
        centroid: Pos3,
        radius: f64,
    },
}

impl NormalizationParams {
    pub fn method(&self) -> Method {
        match self {
            NormalizationParams::MinMax { .. } => Method::MinMax,
            NormalizationParams::UnitSphere { .. } => Method::UnitSphere,
        }
    }

    /// Returns the per-component range the normalized coordinates lie in.
    pub fn domain(&self) -> Domain {
        self.method().normalizer().domain()
    }

    fn mismatch(&self, expected: Method) -> Error {
        Error::ParamsMismatch { expected, found: self.method() }
    }
}

impl fmt::Display for NormalizationParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalizationParams::MinMax { min, max } => write!(
                f,
                "min = [{}, {}, {}], max = [{}, {}, {}]",
                min.x, min.y, min.z, max.x, max.y, max.z,
            ),
            NormalizationParams::UnitSphere { centroid: c, radius } => write!(
                f,
                "centroid = [{}, {}, {}], radius = {}",
                c.x, c.y, c.z, radius,
            ),
        }
    }
}


/// Per-axis min-max normalization into `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMax;

impl Normalizer for MinMax {
    fn method(&self) -> Method {
        Method::MinMax
    }

    fn domain(&self) -> Domain {
        Domain::UNIT
    }

    fn normalize(&self, points: &PointSet) -> Result<Normalized, Error> {
        if points.is_empty() {
            return Err(Degeneracy::Empty.into());
        }

        let bounds = BoundingBox::around(points.iter().copied());
        if let Some(&axis) = Axis::ALL.iter().find(|&&a| bounds.extent(a) == 0.0) {
            return Err(Degeneracy::ZeroExtent(axis).into());
        }

        let (min, max) = (bounds.min, bounds.max);
        let normalized = points.map(|&p| {
            map_axes(p, |axis, v| (v - axis.of(&min)) / (axis.of(&max) - axis.of(&min)))
        });

        Ok(Normalized {
            points: normalized,
            params: NormalizationParams::MinMax { min, max },
        })
    }

    /// `p * (max - min) + min` per axis.
    fn denormalize(
        &self,
        normalized: &PointSet,
        params: &NormalizationParams,
    ) -> Result<PointSet, Error> {
        match *params {
            NormalizationParams::MinMax { min, max } => Ok(normalized.map(|&p| {
                map_axes(p, |axis, v| v * (axis.of(&max) - axis.of(&min)) + axis.of(&min))
            })),
            _ => Err(params.mismatch(Method::MinMax)),
        }
    }
}

/// Centering on the centroid and scaling by the largest distance to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitSphere;

impl Normalizer for UnitSphere {
    fn method(&self) -> Method {
        Method::UnitSphere
    }

    fn domain(&self) -> Domain {
        Domain::SYMMETRIC
    }

    fn normalize(&self, points: &PointSet) -> Result<Normalized, Error> {
        let centroid = points.centroid().ok_or(Degeneracy::Empty)?;
        let radius = points.iter()
            .map(|p| p.distance(centroid))
            .fold(0.0, f64::max);

        if radius == 0.0 {
            return Err(Degeneracy::ZeroRadius.into());
        }

        let normalized = points.map(|&p| Pos3::from_vec((p - centroid) / radius));

        Ok(Normalized {
            points: normalized,
            params: NormalizationParams::UnitSphere { centroid, radius },
        })
    }

    /// `p * radius + centroid`.
    fn denormalize(
        &self,
        normalized: &PointSet,
        params: &NormalizationParams,
    ) -> Result<PointSet, Error> {
        match *params {
            NormalizationParams::UnitSphere { centroid, radius } => {
                Ok(normalized.map(|&p| centroid + p.to_vec() * radius))
            }
            _ => Err(params.mismatch(Method::UnitSphere)),
        }
    }
}


#[cfg(test)]
mod tests {
    use failure::Error;
    use proptest::prelude::*;

    use super::*;
    use crate::error;

    fn points(coords: &[[f64; 3]]) -> PointSet {
        coords.iter().map(|&[x, y, z]| Pos3::new(x, y, z)).collect::<Vec<_>>().into()
    }

    #[test]
    fn method_names() -> Result<(), Error> {
        for &m in &Method::ALL {
            assert_eq!(m.to_string().parse::<Method>()?, m);
            assert_eq!(m.normalizer().method(), m);
        }
        assert!("sphere".parse::<Method>().is_err());

        Ok(())
    }

    #[test]
    fn domains() -> Result<(), Error> {
        assert_eq!(MinMax.domain(), Domain::UNIT);
        assert_eq!(UnitSphere.domain(), Domain::SYMMETRIC);

        let out = UnitSphere.normalize(&points(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]))?;
        assert_eq!(out.params.domain(), Domain::SYMMETRIC);

        Ok(())
    }

    #[test]
    fn denormalize_rejects_foreign_params() -> Result<(), Error> {
        let out = MinMax.normalize(&points(&[[0.0, 0.0, 0.0], [1.0, 2.0, 2.0]]))?;

        match UnitSphere.denormalize(&out.points, &out.params) {
            Err(error::Error::ParamsMismatch { expected, found }) => {
                assert_eq!(expected, Method::UnitSphere);
                assert_eq!(found, Method::MinMax);
            }
            other => panic!("expected params mismatch, got {:?}", other),
        }

        Ok(())
    }

    #[test]
    fn min_max_two_points() -> Result<(), Error> {
        let out = MinMax.normalize(&points(&[[0.0, 0.0, 0.0], [1.0, 2.0, 2.0]]))?;

        assert_eq!(out.points, points(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]));
        assert_eq!(out.params, NormalizationParams::MinMax {
            min: Pos3::new(0.0, 0.0, 0.0),
            max: Pos3::new(1.0, 2.0, 2.0),
        });

        Ok(())
    }

    #[test]
    fn min_max_axes_are_independent() -> Result<(), Error> {
        let out = MinMax.normalize(&points(&[
            [-1.0, 10.0, 5.0],
            [0.0, 20.0, 5.5],
            [1.0, 30.0, 6.0],
        ]))?;

        assert_eq!(out.points[1], Pos3::new(0.5, 0.5, 0.5));

        Ok(())
    }

    #[test]
    fn min_max_flat_axis() {
        let res = MinMax.normalize(&points(&[[0.0, 1.0, 7.0], [1.0, 2.0, 7.0]]));
        match res {
            Err(error::Error::Degenerate(d)) => assert_eq!(d, Degeneracy::ZeroExtent(Axis::Z)),
            other => panic!("expected degenerate error, got {:?}", other),
        }
    }

    #[test]
    fn unit_sphere_symmetric() -> Result<(), Error> {
        let out = UnitSphere.normalize(&points(&[[1.0, 1.0, 1.0], [3.0, 1.0, 1.0]]))?;

        assert_eq!(out.points, points(&[[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]));
        assert_eq!(out.params, NormalizationParams::UnitSphere {
            centroid: Pos3::new(2.0, 1.0, 1.0),
            radius: 1.0,
        });

        Ok(())
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let same = points(&[[3.0, 3.0, 3.0]; 4]);

        for &m in &Method::ALL {
            match m.normalizer().normalize(&same) {
                Err(error::Error::Degenerate(_)) => {}
                other => panic!("{}: expected degenerate error, got {:?}", m, other),
            }
        }
    }

    #[test]
    fn empty_is_degenerate() {
        for &m in &Method::ALL {
            match m.normalizer().normalize(&PointSet::default()) {
                Err(error::Error::Degenerate(Degeneracy::Empty)) => {}
                other => panic!("{}: expected empty error, got {:?}", m, other),
            }
        }
    }

    fn point_cloud() -> impl Strategy<Value = PointSet> {
        prop::collection::vec(prop::array::uniform3(-1e3..1e3f64), 2..64)
            .prop_map(|coords| points(&coords))
    }

    proptest! {
        #[test]
        fn min_max_stays_in_unit_interval(points in point_cloud()) {
            if let Ok(out) = MinMax.normalize(&points) {
                for p in &out.points {
                    for &axis in &Axis::ALL {
                        prop_assert!((0.0..=1.0).contains(&axis.of(p)));
                    }
                }
            }
        }

        #[test]
        fn unit_sphere_stays_inside(points in point_cloud()) {
            if let Ok(out) = UnitSphere.normalize(&points) {
                for p in &out.points {
                    prop_assert!(p.to_vec().magnitude() <= 1.0 + 1e-12);
                }
            }
        }
    }
}
