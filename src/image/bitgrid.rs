//! Packed boolean validity mask.
//!
//! One bit per pixel, rows padded to whole `u64` words so that per-row
//! extents can be found with `leading_zeros`/`trailing_zeros` instead of a
//! pixel walk.

const WORD_BITS: usize = 64;

/// Width × height grid of validity bits. Immutable for the duration of a
/// rectangle search.
#[derive(Clone, PartialEq, Eq)]
pub struct BitGrid {
    w: usize,
    h: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl BitGrid {
    /// All-invalid grid.
    pub fn new(w: usize, h: usize) -> Self {
        let words_per_row = w.div_ceil(WORD_BITS);
        Self {
            w,
            h,
            words_per_row,
            bits: vec![0; words_per_row * h],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut grid = Self::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if f(x, y) {
                    grid.set(x, y, true);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Bit at `(x, y)`. Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.w && y < self.h, "BitGrid index ({x},{y}) out of range");
        let word = self.bits[y * self.words_per_row + x / WORD_BITS];
        (word >> (x % WORD_BITS)) & 1 == 1
    }

    /// Signed lookup; anything outside the grid reads as invalid.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        assert!(x < self.w && y < self.h, "BitGrid index ({x},{y}) out of range");
        let idx = y * self.words_per_row + x / WORD_BITS;
        let mask = 1u64 << (x % WORD_BITS);
        if value {
            self.bits[idx] |= mask;
        } else {
            self.bits[idx] &= !mask;
        }
    }

    /// Number of valid pixels.
    pub fn count_valid(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of valid pixels in `[x_from, x_to)` on row `y`. Columns and rows
    /// outside the grid count as invalid.
    pub fn count_valid_in_span(&self, y: i64, x_from: i64, x_to: i64) -> usize {
        if y < 0 || y as usize >= self.h {
            return 0;
        }
        let lo = x_from.max(0);
        let hi = x_to.min(self.w as i64);
        if lo >= hi {
            return 0;
        }
        let row = self.row_words(y as usize);
        let (lo, hi) = (lo as usize, hi as usize);
        let mut count = 0usize;
        let mut x = lo;
        while x < hi {
            let word_idx = x / WORD_BITS;
            let bit = x % WORD_BITS;
            let take = (WORD_BITS - bit).min(hi - x);
            let mut word = row[word_idx] >> bit;
            if take < WORD_BITS {
                word &= (1u64 << take) - 1;
            }
            count += word.count_ones() as usize;
            x += take;
        }
        count
    }

    /// Leftmost and rightmost valid column of row `y`, or `None` for an empty row.
    pub fn row_extent(&self, y: usize) -> Option<(usize, usize)> {
        let row = self.row_words(y);
        let first = row.iter().position(|&w| w != 0)?;
        let last = row.iter().rposition(|&w| w != 0)?;
        let left = first * WORD_BITS + row[first].trailing_zeros() as usize;
        let right = last * WORD_BITS + (WORD_BITS - 1 - row[last].leading_zeros() as usize);
        Some((left, right))
    }

    fn row_words(&self, y: usize) -> &[u64] {
        let start = y * self.words_per_row;
        &self.bits[start..start + self.words_per_row]
    }
}

impl std::fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitGrid")
            .field("w", &self.w)
            .field("h", &self.h)
            .field("valid", &self.count_valid())
            .finish()
    }
}
