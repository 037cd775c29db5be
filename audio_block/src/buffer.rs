use crate::processor::ChannelBuffers;
use crate::sample::{Sample, CHANNELS};
use smallvec::SmallVec;

/// Non-interleaved scratch storage for hosts whose device hands out interleaved frames.
/// Allocated once, then only overwritten.
pub struct PlanarBuffer {
    data: SmallVec<[Vec<Sample>; CHANNELS]>,
    len: usize,
}

impl PlanarBuffer {
    pub fn new(channels: usize, len: usize) -> Self {
        PlanarBuffer {
            data: (0..channels).map(|_| vec![0.0; len]).collect(),
            len,
        }
    }

    /// Frames per channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[Sample] {
        &self.data[index]
    }

    pub fn clear(&mut self) {
        for channel in self.data.iter_mut() {
            channel.iter_mut().for_each(|x| *x = 0.0);
        }
    }

    /// Writes the first `frames` frames into `out` as interleaved frames, converting every
    /// sample with `convert`. `out` is expected to hold exactly `frames * channels` values.
    #[inline]
    pub fn interleave<T, F>(&self, frames: usize, out: &mut [T], mut convert: F)
    where
        F: FnMut(Sample) -> T,
    {
        let channels = self.data.len();
        if channels == 0 {
            return;
        }
        for (i, frame) in out.chunks_mut(channels).take(frames.min(self.len)).enumerate() {
            for (out, channel) in frame.iter_mut().zip(self.data.iter()) {
                *out = convert(channel[i]);
            }
        }
    }
}

impl ChannelBuffers for PlanarBuffer {
    #[inline]
    fn channels(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn channel_mut(&mut self, index: usize) -> &mut [Sample] {
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_orders_frames_channel_by_channel() {
        let mut buffer = PlanarBuffer::new(2, 4);
        buffer.channel_mut(0).copy_from_slice(&[0.0, 1.0, 2.0, 3.0]);
        buffer.channel_mut(1).copy_from_slice(&[10.0, 11.0, 12.0, 13.0]);

        let mut out = [0i32; 6];
        buffer.interleave(3, &mut out, |x| x as i32);
        assert_eq!(out, [0, 10, 1, 11, 2, 12]);
    }

    #[test]
    fn interleave_stops_at_capacity() {
        let mut buffer = PlanarBuffer::new(1, 2);
        buffer.channel_mut(0).copy_from_slice(&[0.5, -0.5]);

        let mut out = [9.0f32; 4];
        buffer.interleave(4, &mut out, |x| x);
        assert_eq!(out, [0.5, -0.5, 9.0, 9.0]);
    }

    #[test]
    fn clear_zeroes_every_channel() {
        let mut buffer = PlanarBuffer::new(3, 8);
        for ch in 0..buffer.channels() {
            buffer.channel_mut(ch).iter_mut().for_each(|x| *x = 1.0);
        }
        buffer.clear();
        for ch in 0..3 {
            assert!(buffer.channel(ch).iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn slices_of_slices_are_channel_buffers() {
        let mut left = [0.0; 4];
        let mut right = [0.0; 4];
        let mut buffers = [&mut left[..], &mut right[..]];
        let buffers: &mut [&mut [Sample]] = &mut buffers;

        assert_eq!(buffers.channels(), 2);
        buffers.channel_mut(1)[3] = 1.0;
        assert_eq!(right, [0.0, 0.0, 0.0, 1.0]);
    }
}
