//! Fixed-bin quantization of normalized coordinates.
//!
//! A coordinate `c` is mapped to the bin `floor(c * (n_bins - 1))` and a bin
//! `q` back to `q / (n_bins - 1)`, independent of the [`Domain`]. The domain
//! only decides which coordinates are accepted: min-max coordinates in
//! `[0, 1]` give bins in `[0, n_bins - 1]`, unit-sphere coordinates in
//! `[-1, 1]` give signed bins in `[-(n_bins - 1), n_bins - 1]`. Either way a
//! coordinate is never more than `1 / (n_bins - 1)` above its dequantized
//! value.

use std::{convert::TryFrom, fmt, ops::RangeInclusive};

use crate::{
    error::Error,
    math::{Pos3, from_axes},
    points::PointSet,
};


/// Values this far outside of the domain are still accepted and clamped.
/// This absorbs rounding noise from the normalization step.
const DOMAIN_TOLERANCE: f64 = 1e-9;


/// The number of discrete levels per coordinate. Always at least 2 and at
/// most [`BinCount::MAX`], so that every bin index fits into an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinCount(u32);

impl BinCount {
    /// 1024 bins, i.e. 10 bit per coordinate.
    pub const DEFAULT: BinCount = BinCount(1024);

    /// `2^31` bins, the largest bin index is `i32::MAX`.
    pub const MAX: BinCount = BinCount(1 << 31);

    pub fn new(n: u32) -> Result<Self, Error> {
        if n < 2 || n > Self::MAX.0 {
            Err(Error::InvalidBinCount(n.into()))
        } else {
            Ok(BinCount(n))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The index of the highest bin, `n_bins - 1`.
    pub fn max_bin(self) -> u32 {
        self.0 - 1
    }

    /// Number of bits needed to store the magnitude of one bin index.
    pub fn bits(self) -> u32 {
        32 - self.max_bin().leading_zeros()
    }
}

impl Default for BinCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for BinCount {
    type Error = Error;

    fn try_from(n: u64) -> Result<Self, Self::Error> {
        let n = u32::try_from(n).map_err(|_| Error::InvalidBinCount(n))?;
        Self::new(n)
    }
}

impl std::str::FromStr for BinCount {
    type Err = failure::Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(BinCount::try_from(src.parse::<u64>()?)?)
    }
}

impl fmt::Display for BinCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


/// The closed per-component interval normalized coordinates lie in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub lo: f64,
    pub hi: f64,
}

impl Domain {
    /// `[0, 1]`, used by min-max normalization.
    pub const UNIT: Domain = Domain { lo: 0.0, hi: 1.0 };

    /// `[-1, 1]`, used by unit-sphere normalization.
    pub const SYMMETRIC: Domain = Domain { lo: -1.0, hi: 1.0 };

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Returns `c` if it lies in the domain. Values slightly outside of it
    /// are clamped, everything else (including NaN) is an error.
    fn clamp(&self, c: f64) -> Result<f64, Error> {
        if !(c >= self.lo - DOMAIN_TOLERANCE && c <= self.hi + DOMAIN_TOLERANCE) {
            return Err(Error::OutOfRange { value: c });
        }

        Ok(c.max(self.lo).min(self.hi))
    }
}


/// Bin indices of a whole point set, in point order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedPointSet {
    n_bins: BinCount,
    bins: Vec<[i32; 3]>,
}

impl QuantizedPointSet {
    pub fn n_bins(&self) -> BinCount {
        self.n_bins
    }

    pub fn bins(&self) -> &[[i32; 3]] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}


/// Quantizes and dequantizes coordinates of one domain with a fixed bin
/// count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    n_bins: BinCount,
    domain: Domain,
}

impl Quantizer {
    pub fn new(n_bins: BinCount, domain: Domain) -> Self {
        Self { n_bins, domain }
    }

    pub fn n_bins(&self) -> BinCount {
        self.n_bins
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The distance between two neighboring bins. A coordinate is never
    /// more than this above its dequantized value.
    pub fn step(&self) -> f64 {
        1.0 / f64::from(self.n_bins.max_bin())
    }

    /// All bins coordinates of the domain can end up in.
    pub fn bin_range(&self) -> RangeInclusive<i32> {
        let max_bin = f64::from(self.n_bins.max_bin());
        let lo = (self.domain.lo * max_bin).floor() as i32;
        let hi = (self.domain.hi * max_bin).floor() as i32;

        lo..=hi
    }

    /// Returns the bin of a single coordinate.
    pub fn quantize_value(&self, c: f64) -> Result<i32, Error> {
        let c = self.domain.clamp(c)?;
        let max_bin = f64::from(self.n_bins.max_bin());

        // `|c| <= 1` and `max_bin <= i32::MAX`, so the cast never saturates.
        Ok((c * max_bin).floor() as i32)
    }

    /// Returns the coordinate a bin stands for.
    pub fn dequantize_value(&self, q: i32) -> f64 {
        f64::from(q) / f64::from(self.n_bins.max_bin())
    }

    /// Quantizes all points. Fails if any coordinate lies outside of the
    /// domain.
    pub fn quantize(&self, points: &PointSet) -> Result<QuantizedPointSet, Error> {
        let bins = points.iter()
            .map(|p| {
                Ok([
                    self.quantize_value(p.x)?,
                    self.quantize_value(p.y)?,
                    self.quantize_value(p.z)?,
                ])
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(QuantizedPointSet { n_bins: self.n_bins, bins })
    }

    /// Maps all bins back to coordinates of the domain.
    pub fn dequantize(&self, quantized: &QuantizedPointSet) -> PointSet {
        let points = quantized.bins.iter()
            .map(|q| from_axes(|axis| self.dequantize_value(q[axis.index()])))
            .collect::<Vec<Pos3>>();

        PointSet::new(points)
    }
}


#[cfg(test)]
mod tests {
    use failure::Error;
    use proptest::prelude::*;

    use super::*;
    use crate::error;

    #[test]
    fn bin_count_limits() {
        assert!(BinCount::new(0).is_err());
        assert!(BinCount::new(1).is_err());
        assert_eq!(BinCount::new(2).map(BinCount::max_bin).ok(), Some(1));
        assert!(BinCount::try_from(u64::from(u32::MAX) + 1).is_err());
        assert!(BinCount::new((1 << 31) + 1).is_err());
        assert_eq!(BinCount::new(1 << 31).map(BinCount::max_bin).ok(), Some(i32::MAX as u32));
        assert!("abc".parse::<BinCount>().is_err());
    }

    #[test]
    fn bin_count_bits() {
        assert_eq!(BinCount::DEFAULT.bits(), 10);
        assert_eq!(BinCount(2).bits(), 1);
        assert_eq!(BinCount(256).bits(), 8);
        assert_eq!(BinCount(257).bits(), 9);
    }

    #[test]
    fn unit_domain_matches_plain_formula() {
        let q = Quantizer::new(BinCount::DEFAULT, Domain::UNIT);

        assert_eq!(q.quantize_value(0.0).ok(), Some(0));
        assert_eq!(q.quantize_value(1.0).ok(), Some(1023));
        assert_eq!(q.quantize_value(0.5).ok(), Some(511));
        assert_eq!(q.dequantize_value(1023), 1.0);
        assert_eq!(q.dequantize_value(0), 0.0);
    }

    #[test]
    fn symmetric_domain_uses_signed_bins() {
        let q = Quantizer::new(BinCount::new(3).unwrap(), Domain::SYMMETRIC);

        assert_eq!(q.bin_range(), -2..=2);
        assert_eq!(q.quantize_value(-1.0).ok(), Some(-2));
        assert_eq!(q.quantize_value(-0.25).ok(), Some(-1));
        assert_eq!(q.quantize_value(0.0).ok(), Some(0));
        assert_eq!(q.quantize_value(0.9).ok(), Some(1));
        assert_eq!(q.quantize_value(1.0).ok(), Some(2));
        assert_eq!(q.dequantize_value(-2), -1.0);
        assert_eq!(q.dequantize_value(1), 0.5);
        assert_eq!(q.dequantize_value(2), 1.0);

        // Same step width as the unit domain.
        assert_eq!(q.step(), Quantizer::new(BinCount::new(3).unwrap(), Domain::UNIT).step());
    }

    #[test]
    fn out_of_range_is_rejected() {
        let q = Quantizer::new(BinCount::DEFAULT, Domain::UNIT);

        for &v in &[-0.1, 1.1, f64::NAN, f64::INFINITY] {
            match q.quantize_value(v) {
                Err(error::Error::OutOfRange { .. }) => {}
                other => panic!("{}: expected out of range error, got {:?}", v, other),
            }
        }

        // Rounding noise is clamped.
        assert_eq!(q.quantize_value(1.0 + 1e-12).ok(), Some(1023));
        assert_eq!(q.quantize_value(-1e-12).ok(), Some(0));

        let q = Quantizer::new(BinCount::DEFAULT, Domain::SYMMETRIC);
        assert!(q.quantize_value(-1.1).is_err());
        assert!(q.quantize_value(1.0 + 1e-6).is_err());
        assert_eq!(q.quantize_value(-1.0 - 1e-12).ok(), Some(-1023));
        assert_eq!(q.quantize_value(1.0 + 1e-12).ok(), Some(1023));
    }

    #[test]
    fn quantize_point_set() -> Result<(), Error> {
        let q = Quantizer::new(BinCount::new(2)?, Domain::UNIT);
        let points = PointSet::new(vec![Pos3::new(0.0, 0.0, 0.0), Pos3::new(1.0, 1.0, 1.0)]);

        let quantized = q.quantize(&points)?;
        assert_eq!(quantized.bins(), &[[0, 0, 0], [1, 1, 1]]);
        assert_eq!(q.dequantize(&quantized), points);

        Ok(())
    }

    proptest! {
        #[test]
        fn bins_stay_in_range(c in 0.0..=1.0f64, n in 2u32..5000) {
            let q = Quantizer::new(BinCount::new(n).unwrap(), Domain::UNIT);
            let bin = q.quantize_value(c).unwrap();
            prop_assert!(bin >= 0 && bin <= (n - 1) as i32);
        }

        #[test]
        fn signed_bins_stay_in_range(c in -1.0..=1.0f64, n in 2u32..5000) {
            let q = Quantizer::new(BinCount::new(n).unwrap(), Domain::SYMMETRIC);
            let bin = q.quantize_value(c).unwrap();
            prop_assert!(q.bin_range().contains(&bin));
            prop_assert!(bin.abs() <= (n - 1) as i32);
        }

        #[test]
        fn round_trip_error_is_bounded(c in -1.0..=1.0f64, n in 2u32..5000) {
            let q = Quantizer::new(BinCount::new(n).unwrap(), Domain::SYMMETRIC);
            let back = q.dequantize_value(q.quantize_value(c).unwrap());
            prop_assert!((back - c).abs() <= q.step() * (1.0 + 1e-9));
            prop_assert!(back <= c + 1e-12);
        }
    }
}
