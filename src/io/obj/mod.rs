//! The vertex subset of the Wavefront OBJ format.
//!
//! A vertex line starts with the token `v`, followed by three
//! whitespace-separated coordinates:
//!
//! ```text
//! # comment
//! v 0.5 -1.25 3
//! vn 0 0 1
//! f 1 2 3
//! ```
//!
//! Of this example only the `v` line contributes a point.

use std::path::Path;

use crate::{
    error::Error,
    points::PointSet,
};


mod read;
mod write;
#[cfg(test)]
mod tests;

pub use self::{
    read::Reader,
    write::Writer,
};


/// The first token of every vertex line.
pub const VERTEX_MARKER: &str = "v";

/// Reads all vertex positions from the OBJ file at `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<PointSet, Error> {
    Reader::open(path)?.read()
}

/// Writes `points` as vertex-only OBJ file to `path`. Missing parent
/// directories are created and an existing file is overwritten.
pub fn write_file(path: impl AsRef<Path>, points: &PointSet) -> Result<(), Error> {
    Writer::create(path)?.write(points)
}
