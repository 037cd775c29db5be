/// Default number of output channels requested from a device.
pub const CHANNELS: usize = 2;

/// The type processors write into device buffers.
/// Unlike a long chain of per-sample ops, a block here is produced by one summation and
/// normalised right away, so rounding error has no room to accumulate and there is no reason
/// to carry f64 all the way to the driver, which wants f32 anyway.
pub type Sample = f32;
