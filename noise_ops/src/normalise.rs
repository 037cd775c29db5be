//! # Normalise
//!
//! Scale a block to [-1, 1] by its peak absolute value.

use audio_block::Sample;

#[inline]
pub fn peak(block: &[Sample]) -> Sample {
    block.iter().fold(0.0, |peak: Sample, &x| peak.max(x.abs()))
}

/// Divides every sample by the block peak and returns that peak.
/// A silent block is left as is.
#[inline]
pub fn normalise_peak(block: &mut [Sample]) -> Sample {
    let peak = peak(block);
    if peak > 0.0 {
        for x in block.iter_mut() {
            *x /= peak;
        }
    }
    peak
}
