use anyhow::{anyhow, Result};
use audio_block::BlockProcessor;
use crossbeam_channel::Receiver;
use std::sync::{Arc, Mutex};

mod config;
mod device;
mod processor;

pub use self::{
    config::{ServerConfig, DEFAULT_MAX_BLOCK_SIZE},
    device::{render, OutputDevice},
    processor::{NoiseProcessor, GAIN, NUM_ROWS, OFFSET},
};

pub const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Prepare the processor and start the output stream.
    Start,
    /// Stop the output stream and release the processor.
    Stop,
}

/// Control loop: owns the device and the stream, reacts to lifecycle messages until `rx`
/// disconnects.
pub fn run(config: ServerConfig, rx: Receiver<Message>) -> Result<()> {
    let device = OutputDevice::open_default(&config)?;
    let processor = Arc::new(Mutex::new(NoiseProcessor::from_config(&config)));
    let mut stream: Option<cpal::Stream> = None;

    for msg in rx {
        match msg {
            Message::Start => {
                if stream.is_some() {
                    log::debug!("Already playing.");
                    continue;
                }
                let sample_rate = device.sample_rate() as f64;
                lock(processor.as_ref())?.prepare(config.max_block_size, sample_rate)?;
                stream = Some(device.play(Arc::clone(&processor))?);
                log::info!("Output stream started.");
            }
            Message::Stop => stop(&mut stream, &processor)?,
        }
    }

    stop(&mut stream, &processor)
}

fn stop(stream: &mut Option<cpal::Stream>, processor: &Mutex<NoiseProcessor>) -> Result<()> {
    // A callback still in flight after the drop finds the lock taken and renders silence.
    if let Some(stream) = stream.take() {
        drop(stream);
        log::info!("Output stream stopped.");
    }
    lock(processor)?.release();
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| anyhow!("Noise processor lock is poisoned."))
}
