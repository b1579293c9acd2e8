use crate::common::{Int, UInt};
use crate::error::RollError;

/// One iteration of a roll set.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BatchLine {
    pub tally: String,
    pub total: Int,
}

/// Runs `roll` `count` times, in order.
///
/// The first failing iteration ends the set and its error is all that is
/// returned; a partial set is never produced.
pub fn run<T, F>(count: UInt, roll: F) -> Result<Vec<T>, RollError>
where
    F: FnMut(UInt) -> Result<T, RollError>,
{
    (0..count).map(roll).collect()
}
