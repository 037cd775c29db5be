//! # Numeric functions

use audio_block::Sample;

/// Scale `x` by `gain` and shift it by `offset`.
#[inline]
pub fn affine(x: Sample, gain: Sample, offset: Sample) -> Sample {
    x * gain + offset
}
