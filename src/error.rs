//! The error type shared by all stages of the pipeline.

use std::{
    fmt,
    io,
    path::PathBuf,
};

use failure::Fail;

use crate::{math::Axis, normalize::Method};


/// Everything that can go wrong while loading, normalizing, quantizing or
/// analyzing a point set.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "IO error on '{}': {}", _0, _1)]
    Io(DisplayPath, #[cause] io::Error),

    #[fail(display = "invalid vertex line {}: {}", line, reason)]
    Parse {
        /// 1-based line number in the source file.
        line: usize,
        reason: String,
    },

    #[fail(display = "degenerate geometry: {}", _0)]
    Degenerate(Degeneracy),

    #[fail(
        display = "point sets are not aligned: {} original vs. {} reconstructed points",
        original,
        reconstructed
    )]
    DimensionMismatch {
        original: usize,
        reconstructed: usize,
    },

    #[fail(display = "value {} lies outside of the quantization domain", value)]
    OutOfRange {
        value: f64,
    },

    #[fail(display = "invalid bin count {} (2 to 2^31 bins are supported)", _0)]
    InvalidBinCount(u64),

    #[fail(display = "cannot invert {} normalization with {} parameters", expected, found)]
    ParamsMismatch {
        expected: Method,
        found: Method,
    },

    #[fail(display = "unknown normalization method '{}' (valid: minmax, unitsphere)", _0)]
    UnknownMethod(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, cause: io::Error) -> Self {
        Error::Io(DisplayPath(path.into()), cause)
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse { line, reason: reason.into() }
    }
}

impl From<Degeneracy> for Error {
    fn from(src: Degeneracy) -> Self {
        Error::Degenerate(src)
    }
}

/// The ways a point set can be unfit for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// The point set does not contain a single point.
    Empty,

    /// All points share the same coordinate on this axis, so min-max
    /// normalization would divide by zero.
    ZeroExtent(Axis),

    /// All points coincide with the centroid.
    ZeroRadius,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Degeneracy::Empty => write!(f, "point set is empty"),
            Degeneracy::ZeroExtent(axis) => write!(f, "zero extent along the {} axis", axis),
            Degeneracy::ZeroRadius => write!(f, "all points coincide (radius is zero)"),
        }
    }
}

/// A path that can be used in a `#[fail(display)]` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPath(pub PathBuf);

impl fmt::Display for DisplayPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.display().fmt(f)
    }
}
