//! No-data masking of multi-band 8-bit rasters.
//!
//! A definition is a list of slabs, each holding one closed interval per band
//! (or a single interval shared by every band). In no-data mode a pixel is
//! masked out only when every band falls in some slab. In valid-range mode
//! the test is inverted per band and a pixel is masked out as soon as one
//! band leaves every valid range.

use crate::image::{BitGrid, ImageU8};
use log::debug;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub enum NdvError {
    /// A term was not a number or `min..max` range.
    InvalidNumber { term: String },
    /// A slab string held no terms.
    EmptySlab,
    /// Both no-data values and valid ranges were given.
    ConflictingModes,
    /// A slab names neither one interval nor one per band.
    WrongBandCount {
        slab: usize,
        intervals: usize,
        bands: usize,
    },
    NoBands,
    BandSizeMismatch {
        band: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl std::fmt::Display for NdvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { term } => write!(f, "no-data value was not a number: '{}'", term),
            Self::EmptySlab => write!(f, "could not parse empty no-data term"),
            Self::ConflictingModes => {
                write!(f, "no-data values and valid ranges cannot be used together")
            }
            Self::WrongBandCount {
                slab,
                intervals,
                bands,
            } => write!(
                f,
                "no-data term {} has {} intervals but the image has {} bands",
                slab, intervals, bands
            ),
            Self::NoBands => write!(f, "image has no bands"),
            Self::BandSizeMismatch {
                band,
                expected,
                found,
            } => write!(
                f,
                "band {} is {}x{}, expected {}x{}",
                band, found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for NdvError {}

/// Closed interval `[min, max]`; a single value parses to `[v, v]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NdvInterval {
    pub min: f64,
    pub max: f64,
}

impl NdvInterval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

fn parse_bound(s: &str, term: &str) -> Result<f64, NdvError> {
    s.trim()
        .to_ascii_lowercase()
        .parse::<f64>()
        .map_err(|_| NdvError::InvalidNumber {
            term: term.to_string(),
        })
}

impl FromStr for NdvInterval {
    type Err = NdvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.find("..") {
            None => {
                let v = parse_bound(s, s)?;
                Ok(Self::new(v, v))
            }
            Some(delim) => Ok(Self::new(
                parse_bound(&s[..delim], s)?,
                parse_bound(&s[delim + 2..], s)?,
            )),
        }
    }
}

/// One interval per band, separated by spaces: `"0 0 0"` or `"0..5 250..255"`.
#[derive(Clone, Debug, PartialEq)]
pub struct NdvSlab {
    pub range_by_band: Vec<NdvInterval>,
}

impl NdvSlab {
    /// Interval applying to `band`; a single interval covers every band.
    pub fn interval_for(&self, band: usize) -> Option<NdvInterval> {
        if self.range_by_band.len() == 1 {
            self.range_by_band.first().copied()
        } else {
            self.range_by_band.get(band).copied()
        }
    }
}

impl FromStr for NdvSlab {
    type Err = NdvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let range_by_band = s
            .split_whitespace()
            .map(NdvInterval::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if range_by_band.is_empty() {
            return Err(NdvError::EmptySlab);
        }
        Ok(Self { range_by_band })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NdvDef {
    pub slabs: Vec<NdvSlab>,
    /// Slabs hold valid ranges rather than no-data values.
    pub invert: bool,
}

impl NdvDef {
    /// Build from no-data terms or valid-range terms; at most one list may be
    /// non-empty.
    pub fn new<S: AsRef<str>>(ndv: &[S], valid_range: &[S]) -> Result<Self, NdvError> {
        if !ndv.is_empty() && !valid_range.is_empty() {
            return Err(NdvError::ConflictingModes);
        }
        let invert = !valid_range.is_empty();
        let terms = if invert { valid_range } else { ndv };
        let slabs = terms
            .iter()
            .map(|t| t.as_ref().parse::<NdvSlab>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { slabs, invert })
    }

    pub fn is_empty(&self) -> bool {
        self.slabs.is_empty()
    }

    /// Per-band flag: `true` marks a no-data sample for this band.
    fn check_band(&self, band: usize, bands: usize, img: &ImageU8) -> Result<Vec<bool>, NdvError> {
        let mut flags = vec![false; img.w * img.h];
        for (slab_idx, slab) in self.slabs.iter().enumerate() {
            let range = slab.interval_for(band).ok_or(NdvError::WrongBandCount {
                slab: slab_idx,
                intervals: slab.range_by_band.len(),
                bands,
            })?;
            for y in 0..img.h {
                for (x, &v) in img.row(y).iter().enumerate() {
                    if range.contains(v as f64) {
                        flags[y * img.w + x] = true;
                    }
                }
            }
        }
        if self.invert {
            for f in flags.iter_mut() {
                *f = !*f;
            }
        }
        Ok(flags)
    }

    /// Combine all bands into a validity mask (`true` = data pixel).
    pub fn build_mask(&self, bands: &[ImageU8]) -> Result<BitGrid, NdvError> {
        let first = bands.first().ok_or(NdvError::NoBands)?;
        let (w, h) = (first.w, first.h);
        for (band, img) in bands.iter().enumerate() {
            if (img.w, img.h) != (w, h) {
                return Err(NdvError::BandSizeMismatch {
                    band,
                    expected: (w, h),
                    found: (img.w, img.h),
                });
            }
        }
        for (slab_idx, slab) in self.slabs.iter().enumerate() {
            let intervals = slab.range_by_band.len();
            if intervals != 1 && intervals != bands.len() {
                return Err(NdvError::WrongBandCount {
                    slab: slab_idx,
                    intervals,
                    bands: bands.len(),
                });
            }
        }

        // no-data mode starts all-masked and clears; valid-range mode the reverse
        let mut nodata = vec![!self.invert; w * h];
        for (band, img) in bands.iter().enumerate() {
            let flags = self.check_band(band, bands.len(), img)?;
            for (total, flag) in nodata.iter_mut().zip(flags) {
                if self.invert {
                    *total |= flag;
                } else {
                    *total &= flag;
                }
            }
        }

        let mask = BitGrid::from_fn(w, h, |x, y| !nodata[y * w + x]);
        debug!(
            "ndv: {} slabs invert={} -> {} of {} pixels valid",
            self.slabs.len(),
            self.invert,
            mask.count_valid(),
            w * h
        );
        Ok(mask)
    }
}
