#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Block size {max_block_size} and row count {num_rows} must both be positive.")]
    Configuration {
        max_block_size: usize,
        num_rows: usize,
    },
    #[error("Requested {requested} samples, but the configured block holds {capacity}.")]
    OutOfRange { requested: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
