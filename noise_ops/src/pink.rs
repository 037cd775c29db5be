//! # Pink noise
//!
//! Voss-McCartney row summation over one block at a time.
//!
//! Row `r` holds a random value for 2^r samples, so row 0 is white noise and every next row
//! is an octave lower. The block is the sum of all rows, normalised by its peak.
//!
//! Each call to `generate` redraws every row from scratch. Rows do not continue across
//! blocks, which trades low frequency continuity between blocks for a block that does not
//! depend on anything that came before it.

use crate::error::{Error, Result};
use crate::hold::{hold_chunks, step_size};
use crate::noise::{NoiseRng, RandomSource};
use crate::normalise::normalise_peak;
use audio_block::Sample;
use itertools::izip;

pub struct PinkNoise<R = NoiseRng> {
    source: R,
    /// Row matrix, every row is `capacity` long.
    rows: Vec<Vec<Sample>>,
    output: Vec<Sample>,
    capacity: usize,
    /// Length of the last generated block.
    len: usize,
}

impl PinkNoise<NoiseRng> {
    pub fn new() -> Self {
        PinkNoise::with_source(NoiseRng::new())
    }
}

impl Default for PinkNoise<NoiseRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> PinkNoise<R> {
    /// Unconfigured synthesizer drawing from `source`. Nothing is allocated until `configure`.
    pub fn with_source(source: R) -> Self {
        PinkNoise {
            source,
            rows: Vec::new(),
            output: Vec::new(),
            capacity: 0,
            len: 0,
        }
    }

    /// Allocates `num_rows` rows and the output for blocks of up to `max_block_size` samples.
    ///
    /// Not real-time-safe. On error the previous buffers are left untouched.
    pub fn configure(&mut self, max_block_size: usize, num_rows: usize) -> Result<()> {
        if max_block_size == 0 || num_rows == 0 {
            return Err(Error::Configuration {
                max_block_size,
                num_rows,
            });
        }

        self.rows.resize_with(num_rows, Vec::new);
        for row in self.rows.iter_mut() {
            row.clear();
            row.resize(max_block_size, 0.0);
        }
        self.output.clear();
        self.output.resize(max_block_size, 0.0);
        self.capacity = max_block_size;
        self.len = 0;

        log::debug!(
            "Pink noise rows allocated: {} x {} samples.",
            num_rows,
            max_block_size
        );
        Ok(())
    }

    /// Produces the next `num_samples` samples in [-1, 1].
    ///
    /// The returned block lives in the synthesizer and is overwritten by the next call.
    /// Fails without touching any state when `num_samples` exceeds the configured block size.
    /// Real-time-safe: no allocation, no locking.
    pub fn generate(&mut self, num_samples: usize) -> Result<&[Sample]> {
        if num_samples > self.capacity {
            return Err(Error::OutOfRange {
                requested: num_samples,
                capacity: self.capacity,
            });
        }

        let output = &mut self.output[..num_samples];
        output.iter_mut().for_each(|x| *x = 0.0);

        for (r, row) in self.rows.iter_mut().enumerate() {
            let row = &mut row[..num_samples];
            hold_chunks(row, step_size(r), &mut self.source);
            for (y, &x) in izip!(output.iter_mut(), row.iter()) {
                *y += x;
            }
        }

        normalise_peak(output);
        self.len = num_samples;

        Ok(&self.output[..num_samples])
    }

    /// Frees the row matrix and the output. Generating afterwards needs another `configure`.
    pub fn release(&mut self) {
        self.rows = Vec::new();
        self.output = Vec::new();
        self.capacity = 0;
        self.len = 0;
    }

    /// Largest block `generate` accepts, 0 when unconfigured.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Contribution of row `index` to the last generated block.
    pub fn row(&self, index: usize) -> Option<&[Sample]> {
        self.rows.get(index).map(|row| &row[..self.len])
    }

    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }
}
