//! Normalization, fixed-bin quantization and reconstruction of mesh vertex
//! positions, plus the error metrics that tell you how much was lost.
//!
//! The typical flow for one point set is:
//!
//! ```
//! use meshquant::{
//!     analysis::compute_errors,
//!     io::obj,
//!     normalize::{Method, Normalizer},
//!     quantize::{BinCount, Quantizer},
//!     reconstruct::reconstruct,
//! };
//!
//! # fn main() -> Result<(), meshquant::Error> {
//! let points = obj::Reader::new("v 0 0 0\nv 1 2 2\n".as_bytes()).read()?;
//!
//! let normalized = Method::MinMax.normalizer().normalize(&points)?;
//! let quantizer = Quantizer::new(BinCount::new(2)?, normalized.params.domain());
//! let quantized = quantizer.quantize(&normalized.points)?;
//! let reconstructed = reconstruct(&quantizer.dequantize(&quantized), &normalized.params)?;
//!
//! assert_eq!(compute_errors(&points, &reconstructed)?.mse, 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! [`pipeline::Pipeline`] runs this for every method and every `.obj` file
//! of a directory.

pub mod analysis;
mod error;
pub mod io;
pub mod math;
pub mod normalize;
pub mod pipeline;
pub mod points;
pub mod quantize;
pub mod reconstruct;
pub mod report;

pub use self::{
    error::{Degeneracy, DisplayPath, Error},
    math::{Axis, Pos3},
    points::PointSet,
};
