pub mod buffer;
pub mod processor;
pub mod sample;

pub use self::{
    buffer::PlanarBuffer,
    processor::{BlockProcessor, ChannelBuffers},
    sample::{Sample, CHANNELS},
};
