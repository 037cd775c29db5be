use alloc_counter::{count_alloc, AllocCounterSystem};
use audio_block::{BlockProcessor, PlanarBuffer};
use noise_ops::{NoiseRng, PinkNoise};
use noise_server::{render, NoiseProcessor};
use std::sync::Mutex;

#[global_allocator]
static A: AllocCounterSystem = AllocCounterSystem;

#[test]
fn generate_does_not_allocate() {
    let mut pink = PinkNoise::with_source(NoiseRng::seeded(1));
    pink.configure(512, 16).unwrap();

    let (counts, _) = count_alloc(|| {
        for &n in &[512, 511, 64, 1, 0] {
            pink.generate(n).unwrap();
        }
        assert!(pink.generate(513).is_err());
    });
    assert_eq!(counts, (0, 0, 0));
}

#[test]
fn process_does_not_allocate() {
    let mut processor = NoiseProcessor::with_source(NoiseRng::seeded(2));
    processor.prepare(256, 48_000.0).unwrap();
    let mut buffer = PlanarBuffer::new(2, 1024);

    let (counts, _) = count_alloc(|| {
        processor.process(&mut buffer, 256);
        processor.process(&mut buffer, 100);
        // Does not fit: silence, still without allocating.
        processor.process(&mut buffer, 1024);
    });
    assert_eq!(counts, (0, 0, 0));
    assert_eq!(processor.dropped_blocks(), 2);
}

#[test]
fn device_callback_does_not_allocate() {
    let mut processor = NoiseProcessor::with_source(NoiseRng::seeded(3));
    processor.prepare(128, 44_100.0).unwrap();
    let processor = Mutex::new(processor);
    let mut scratch = PlanarBuffer::new(2, 128);
    let mut data = vec![0i16; 2 * 500];

    let (counts, _) = count_alloc(|| render(&processor, &mut scratch, &mut data));
    assert_eq!(counts, (0, 0, 0));
}
