use crate::config::ServerConfig;
use alloc_counter::no_alloc;
use audio_block::{BlockProcessor, ChannelBuffers, Sample};
use itertools::izip;
use noise_ops::{pure::affine, Error, NoiseRng, PinkNoise, RandomSource};

/// Rows summed per block. The lowest row holds its value for 2^15 samples.
pub const NUM_ROWS: usize = 16;
pub const GAIN: Sample = 0.25;
pub const OFFSET: Sample = -0.125;

/// Writes an independent pink noise block into every output channel.
pub struct NoiseProcessor<R = NoiseRng> {
    pink: PinkNoise<R>,
    prepared: bool,
    /// Channel blocks replaced by silence since the last `prepare`.
    dropped_blocks: usize,
}

impl NoiseProcessor<NoiseRng> {
    pub fn new() -> Self {
        NoiseProcessor::with_source(NoiseRng::new())
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let source = config.seed.map(NoiseRng::seeded).unwrap_or_default();
        NoiseProcessor::with_source(source)
    }
}

impl Default for NoiseProcessor<NoiseRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> NoiseProcessor<R> {
    pub fn with_source(source: R) -> Self {
        NoiseProcessor {
            pink: PinkNoise::with_source(source),
            prepared: false,
            dropped_blocks: 0,
        }
    }

    #[inline]
    pub fn dropped_blocks(&self) -> usize {
        self.dropped_blocks
    }

    /// Fills `out` with a fresh block, or with silence if the block does not fit.
    #[no_alloc]
    fn render_channel(&mut self, out: &mut [Sample]) {
        match self.pink.generate(out.len()) {
            Ok(block) => {
                for (y, &x) in izip!(out.iter_mut(), block) {
                    *y = affine(x, GAIN, OFFSET);
                }
            }
            Err(_) => {
                out.iter_mut().for_each(|y| *y = 0.0);
                self.dropped_blocks += 1;
            }
        }
    }
}

impl<R: RandomSource> BlockProcessor for NoiseProcessor<R> {
    type Error = Error;

    fn prepare(&mut self, expected_block_size: usize, sample_rate: f64) -> Result<(), Error> {
        log::info!(
            "Preparing to play audio: expected block size = {}, sample rate = {}.",
            expected_block_size,
            sample_rate
        );
        self.pink.configure(expected_block_size, NUM_ROWS)?;
        self.prepared = true;
        self.dropped_blocks = 0;
        Ok(())
    }

    fn process<B: ChannelBuffers + ?Sized>(&mut self, buffers: &mut B, num_samples: usize) {
        for channel in 0..buffers.channels() {
            let out = buffers.channel_mut(channel);
            let len = num_samples.min(out.len());
            self.render_channel(&mut out[..len]);
        }
    }

    fn release(&mut self) {
        if self.prepared {
            log::info!(
                "Releasing audio resources, {} blocks dropped.",
                self.dropped_blocks
            );
        }
        self.pink.release();
        self.prepared = false;
    }
}
