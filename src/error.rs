use crate::common::{Operator, UInt};
use crate::parse::SyntaxError;
use crate::roll::ResolverError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("Roller encountered error with \"{dice}\": {source}")]
    Resolver {
        dice: String,
        #[source]
        source: ResolverError,
    },
}

impl RollError {
    pub fn resolver(dice: impl ToString, source: ResolverError) -> Self {
        Self::Resolver {
            dice: dice.to_string(),
            source,
        }
    }

    /// The single chat line shown for this error.
    ///
    /// Range errors already read as a corrective hint, so they are shown bare.
    pub fn user_message(&self) -> String {
        match self {
            Self::Range(err) => err.to_string(),
            err => format!("Error: {}", err),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Please roll a dice value {min} or greater")]
    TooFewSides { sides: UInt, min: UInt },
    #[error("Please roll dice up to d{max}")]
    TooManySides { sides: UInt, max: UInt },
    #[error("Please keep the dice pool below {max}")]
    PoolTooLarge { count: UInt, max: UInt },
    #[error("Please roll at least one die")]
    EmptyPool,
    #[error("Roll set must be between {min}-{max}")]
    BatchSize { count: u64, min: UInt, max: UInt },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Tried to divide by zero!")]
    DivideByZero,
    #[error("{0} is not between two numbers!")]
    MissingOperand(Operator),
    #[error("Extra numbers detected!")]
    ExtraOperands,
    #[error("Result of '{0}' is out of range")]
    Overflow(Operator),
}
