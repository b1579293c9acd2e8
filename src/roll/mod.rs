mod error;
mod resolver;
mod roller;
mod tally;

pub use error::ResolverError;
pub use resolver::{DefaultRoller, DiceBag, Resolution, Resolver};
pub use roller::Roller;
pub use tally::{DieTally, Tally};

#[cfg(test)]
pub(crate) use roller::CyclingRoller;
