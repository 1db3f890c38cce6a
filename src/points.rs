//! Point sets and simple statistics about them.

use std::{
    fmt,
    ops::Index,
    slice,
};

use cgmath::{prelude::*, Vector3};

use crate::math::{Axis, Pos3, from_axes};


/// An ordered sequence of 3D positions.
///
/// The order is the order in which the vertices appeared in the source file
/// and every stage of the pipeline preserves it. That is what makes the
/// original and reconstructed point sets comparable index by index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet {
    points: Vec<Pos3>,
}

impl PointSet {
    pub fn new(points: Vec<Pos3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Pos3> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Pos3] {
        &self.points
    }

    /// Returns a new point set with `f` applied to every point.
    pub fn map(&self, f: impl FnMut(&Pos3) -> Pos3) -> Self {
        Self::new(self.points.iter().map(f).collect())
    }

    /// Returns the mean of all points or `None` if the set is empty.
    pub fn centroid(&self) -> Option<Pos3> {
        if self.is_empty() {
            return None;
        }

        let sum = self.points.iter().fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p.to_vec());
        Some(Pos3::from_vec(sum / self.len() as f64))
    }

    /// Computes count and per-axis statistics. Returns `None` for an empty
    /// set.
    pub fn stats(&self) -> Option<PointStats> {
        let centroid = self.centroid()?;
        let bounds = BoundingBox::around(self.iter().copied());
        let n = self.len() as f64;

        let axes = Axis::ALL.map(|axis| {
            let mean = axis.of(&centroid);
            let variance = self.points.iter()
                .map(|p| (axis.of(p) - mean).powi(2))
                .sum::<f64>() / n;

            AxisStats {
                min: axis.of(&bounds.min),
                max: axis.of(&bounds.max),
                mean,
                std: variance.sqrt(),
            }
        });

        Some(PointStats { count: self.len(), axes })
    }
}

impl From<Vec<Pos3>> for PointSet {
    fn from(points: Vec<Pos3>) -> Self {
        Self::new(points)
    }
}

impl Index<usize> for PointSet {
    type Output = Pos3;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Pos3;
    type IntoIter = slice::Iter<'a, Pos3>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


/// Statistics of a single coordinate axis. `std` is the population standard
/// deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

/// Vertex count and statistics for all three axes.
#[derive(Debug, Clone, PartialEq)]
pub struct PointStats {
    pub count: usize,
    pub axes: [AxisStats; 3],
}

impl PointStats {
    pub fn axis(&self, axis: Axis) -> &AxisStats {
        &self.axes[axis.index()]
    }

    pub fn min(&self) -> Pos3 {
        from_axes(|a| self.axis(a).min)
    }

    pub fn max(&self) -> Pos3 {
        from_axes(|a| self.axis(a).max)
    }

    pub fn mean(&self) -> Pos3 {
        from_axes(|a| self.axis(a).mean)
    }

    pub fn std(&self) -> Pos3 {
        from_axes(|a| self.axis(a).std)
    }
}


/// An axis aligned bounding box.
#[derive(Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Pos3,
    pub max: Pos3,
}

impl BoundingBox {
    /// Creates an invalid bounding box: all lower bounds are ∞, all upper
    /// bounds are -∞. Once you added a single point, the bounding box will be
    /// valid.
    pub fn new() -> Self {
        Self {
            min: Pos3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Pos3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Creates a bounding box around all points of the given iterator. If the
    /// iterator is empty, an invalid bounding box is returned (see
    /// [`BoundingBox::new`]).
    pub fn around(iter: impl IntoIterator<Item = Pos3>) -> Self {
        let mut out = Self::new();
        for p in iter {
            out.add_point(p);
        }
        out
    }

    /// Adds a point to the bounding box, enlarging it if the point lies
    /// outside of the box.
    pub fn add_point(&mut self, p: Pos3) {
        for &axis in &Axis::ALL {
            let i = axis.index();
            if p[i] < self.min[i] {
                self.min[i] = p[i];
            }
            if p[i] > self.max[i] {
                self.max[i] = p[i];
            }
        }
    }

    /// Returns `max - min` along the given axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        axis.of(&self.max) - axis.of(&self.min)
    }

    /// Returns `true` if all bounds are finite.
    pub fn is_valid(&self) -> bool {
        Axis::ALL.iter().all(|&a| a.of(&self.min).is_finite() && a.of(&self.max).is_finite())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BoundingBox")
            .field("x", &(self.min.x..self.max.x))
            .field("y", &(self.min.y..self.max.y))
            .field("z", &(self.min.z..self.max.z))
            .finish()
    }
}
