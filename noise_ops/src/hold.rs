use crate::noise::RandomSource;
use audio_block::Sample;
use std::convert::TryFrom;

/// Hold interval of the given row: 2^row samples, saturating for rows wider than any block.
#[inline]
pub fn step_size(row: usize) -> usize {
    u32::try_from(row)
        .ok()
        .and_then(|r| 1usize.checked_shl(r))
        .unwrap_or(usize::MAX)
}

/// Splits `row` into chunks of `step` samples and fills every chunk with one fresh draw.
/// The last chunk may be shorter and still gets its own draw.
#[inline]
pub fn hold_chunks<R: RandomSource + ?Sized>(row: &mut [Sample], step: usize, source: &mut R) {
    for chunk in row.chunks_mut(step.max(1)) {
        let value = source.next_sample();
        chunk.iter_mut().for_each(|x| *x = value);
    }
}
