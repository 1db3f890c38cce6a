//! Coordinate types and per-axis helpers.

use std::fmt;

use cgmath::Point3;


/// The position type used throughout this crate.
pub type Pos3 = Point3<f64>;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component index of this axis (`0`, `1` or `2`).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the coordinate of `p` along this axis.
    pub fn of(self, p: &Pos3) -> f64 {
        p[self.index()]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }.fmt(f)
    }
}

/// Applies `f` to every coordinate of `p`, passing the axis along.
pub fn map_axes(p: Pos3, mut f: impl FnMut(Axis, f64) -> f64) -> Pos3 {
    Pos3::new(f(Axis::X, p.x), f(Axis::Y, p.y), f(Axis::Z, p.z))
}

/// Builds a position by evaluating `f` once per axis.
pub fn from_axes(mut f: impl FnMut(Axis) -> f64) -> Pos3 {
    Pos3::new(f(Axis::X), f(Axis::Y), f(Axis::Z))
}
