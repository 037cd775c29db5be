mod error;
mod hold;
mod noise;
mod normalise;
mod pink;
pub mod pure;

pub use self::{error::*, hold::*, noise::*, normalise::*, pink::*};
