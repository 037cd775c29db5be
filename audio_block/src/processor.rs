use crate::sample::Sample;

/// Mutable per-channel views of the device output for one block.
pub trait ChannelBuffers {
    fn channels(&self) -> usize;

    fn channel_mut(&mut self, index: usize) -> &mut [Sample];
}

impl<'a> ChannelBuffers for [&'a mut [Sample]] {
    #[inline]
    fn channels(&self) -> usize {
        self.len()
    }

    #[inline]
    fn channel_mut(&mut self, index: usize) -> &mut [Sample] {
        &mut *self[index]
    }
}

/// What a host needs from anything it drives with buffer callbacks.
///
/// `prepare` and `release` come from the control thread on device start/stop or parameter
/// change, `process` comes from the audio thread at the block cadence. The host guarantees
/// that at most one of them runs at a time.
pub trait BlockProcessor {
    type Error;

    /// Announces the block size to expect from now on. May allocate.
    fn prepare(&mut self, expected_block_size: usize, sample_rate: f64) -> Result<(), Self::Error>;

    /// Fills the first `num_samples` of every channel. Must not allocate, lock or block.
    fn process<B: ChannelBuffers + ?Sized>(&mut self, buffers: &mut B, num_samples: usize);

    /// Frees whatever `prepare` allocated. Safe to call repeatedly or without `prepare`.
    fn release(&mut self);
}
