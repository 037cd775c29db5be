use crate::config::ServerConfig;
use anyhow::{anyhow, Context, Result};
use audio_block::{BlockProcessor, ChannelBuffers, PlanarBuffer};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

/// Default output device of the default host, with the channel count we asked for.
pub struct OutputDevice {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: cpal::SampleFormat,
    max_block_size: usize,
}

impl OutputDevice {
    pub fn open_default(config: &ServerConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default output device available."))?;
        let supported = device
            .default_output_config()
            .context("Default output format error.")?;

        let sample_format = supported.sample_format();
        let mut stream_config = supported.config();
        if stream_config.channels as usize != config.output_channels {
            log::warn!(
                "Device defaults to {} channels, requesting {}.",
                stream_config.channels,
                config.output_channels
            );
            stream_config.channels = config.output_channels as u16;
        }

        log::info!(
            "Output device: {} ({:?}, {} Hz, {} channels).",
            device.name().unwrap_or_else(|_| String::from("unknown")),
            sample_format,
            stream_config.sample_rate.0,
            stream_config.channels
        );

        Ok(OutputDevice {
            device,
            config: stream_config,
            sample_format,
            max_block_size: config.max_block_size,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn channels(&self) -> usize {
        self.config.channels as usize
    }

    /// Starts an output stream pulling blocks from `processor`.
    /// The processor must already be prepared for `max_block_size` samples.
    pub fn play<P>(&self, processor: Arc<Mutex<P>>) -> Result<cpal::Stream>
    where
        P: BlockProcessor + Send + 'static,
    {
        let stream = match self.sample_format {
            cpal::SampleFormat::F32 => self.build_stream::<f32, P>(processor),
            cpal::SampleFormat::I16 => self.build_stream::<i16, P>(processor),
            cpal::SampleFormat::U16 => self.build_stream::<u16, P>(processor),
        }?;
        stream.play().context("Failed to play output stream.")?;
        Ok(stream)
    }

    fn build_stream<T, P>(&self, processor: Arc<Mutex<P>>) -> Result<cpal::Stream>
    where
        T: cpal::Sample,
        P: BlockProcessor + Send + 'static,
    {
        let mut scratch = PlanarBuffer::new(self.channels(), self.max_block_size);
        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    render(&processor, &mut scratch, data);
                },
                |err| log::error!("An error occurred on output stream: {}.", err),
            )
            .context("Failed to build output stream.")
    }
}

/// Audio thread side: fills an interleaved device buffer block by block.
/// Never waits for the control thread; if it holds the processor, this buffer is silent.
pub fn render<T, P>(processor: &Mutex<P>, scratch: &mut PlanarBuffer, data: &mut [T])
where
    T: cpal::Sample,
    P: BlockProcessor,
{
    let channels = scratch.channels();
    let mut processor = match processor.try_lock() {
        Ok(processor) if channels > 0 && !scratch.is_empty() => processor,
        _ => {
            silence(data);
            return;
        }
    };
    for chunk in data.chunks_mut(scratch.len() * channels) {
        let frames = chunk.len() / channels;
        processor.process(&mut *scratch, frames);
        scratch.interleave(frames, chunk, |x| <T as cpal::Sample>::from(&x));
    }
}

fn silence<T: cpal::Sample>(data: &mut [T]) {
    for out in data.iter_mut() {
        *out = <T as cpal::Sample>::from(&0.0f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::NoiseProcessor;
    use noise_ops::NoiseRng;

    fn shared(seed: u64, block_size: usize) -> Mutex<NoiseProcessor> {
        let mut processor = NoiseProcessor::with_source(NoiseRng::seeded(seed));
        processor.prepare(block_size, 48_000.0).unwrap();
        Mutex::new(processor)
    }

    #[test]
    fn large_buffers_are_split_into_blocks() {
        let processor = shared(1, 64);
        let mut scratch = PlanarBuffer::new(2, 64);
        let mut data = [1.0f32; 2 * 150];

        render(&processor, &mut scratch, &mut data);

        assert!(data.iter().all(|x| (-0.375..=0.125).contains(x)));
        assert_eq!(processor.lock().unwrap().dropped_blocks(), 0);
    }

    #[test]
    fn frames_are_interleaved() {
        let processor = shared(2, 16);
        let mut scratch = PlanarBuffer::new(2, 16);
        let mut data = [0.0f32; 32];

        render(&processor, &mut scratch, &mut data);

        for (i, frame) in data.chunks(2).enumerate() {
            assert_eq!(frame[0], scratch.channel(0)[i]);
            assert_eq!(frame[1], scratch.channel(1)[i]);
        }
    }

    #[test]
    fn busy_processor_means_silence() {
        let processor = shared(3, 16);
        let mut scratch = PlanarBuffer::new(2, 16);
        let mut data = [1.0f32; 32];

        let guard = processor.lock().unwrap();
        render(&processor, &mut scratch, &mut data);
        drop(guard);

        assert!(data.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn integer_formats_are_converted() {
        let processor = shared(4, 16);
        let mut scratch = PlanarBuffer::new(1, 16);
        let mut data = [0u16; 16];

        render(&processor, &mut scratch, &mut data);

        for (&out, &x) in data.iter().zip(scratch.channel(0)) {
            assert_eq!(out, <u16 as cpal::Sample>::from(&x));
        }
    }
}
