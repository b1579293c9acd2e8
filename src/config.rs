use crate::common::{DiceGroup, Token, UInt};
use crate::error::RangeError;

/// Bounds every request is checked against before a single die is rolled.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Limits {
    pub min_sides: UInt,
    pub max_sides: UInt,
    pub max_pool: UInt,
    pub min_batch: UInt,
    pub max_batch: UInt,
    /// Physical dice one resolver call may roll, explosions and rerolls included.
    pub max_rolls: usize,
}

impl Limits {
    pub fn check_dice(&self, dice: &DiceGroup) -> Result<(), RangeError> {
        if dice.sides < self.min_sides {
            Err(RangeError::TooFewSides {
                sides: dice.sides,
                min: self.min_sides,
            })
        } else if dice.sides > self.max_sides {
            Err(RangeError::TooManySides {
                sides: dice.sides,
                max: self.max_sides,
            })
        } else if dice.count > self.max_pool {
            Err(RangeError::PoolTooLarge {
                count: dice.count,
                max: self.max_pool,
            })
        } else if dice.count == 0 {
            Err(RangeError::EmptyPool)
        } else {
            Ok(())
        }
    }

    /// Checks every dice group in `tokens`, stopping at the first violation.
    pub fn check_tokens<'a>(
        &self,
        tokens: impl IntoIterator<Item = &'a Token>,
    ) -> Result<(), RangeError> {
        tokens
            .into_iter()
            .filter_map(|token| match token {
                Token::Dice(dice) => Some(dice),
                _ => None,
            })
            .try_for_each(|dice| self.check_dice(dice))
    }

    pub fn check_batch(&self, count: u64) -> Result<UInt, RangeError> {
        let err = RangeError::BatchSize {
            count,
            min: self.min_batch,
            max: self.max_batch,
        };
        match UInt::try_from(count) {
            Ok(n) if (self.min_batch..=self.max_batch).contains(&n) => Ok(n),
            _ => Err(err),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_sides: 2,
            max_sides: 100,
            max_pool: 500,
            min_batch: 2,
            max_batch: 20,
            max_rolls: 10_000,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    /// Command keyword, matched case-insensitively.
    pub prefix: String,
    pub limits: Limits,
}

impl Config {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: String::from("!roll"),
            limits: Limits::default(),
        }
    }
}
