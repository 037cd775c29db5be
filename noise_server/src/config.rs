use audio_block::CHANNELS;

pub const DEFAULT_MAX_BLOCK_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Block size the processor is prepared for.
    /// Device buffers larger than this are rendered in several blocks.
    pub max_block_size: usize,
    pub output_channels: usize,
    /// Fixed seed for reproducible noise, entropy otherwise.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
            output_channels: CHANNELS,
            seed: None,
        }
    }
}
