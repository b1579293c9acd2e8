use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("{0}")]
    Constraint(String),
}

impl ResolverError {
    pub fn constraint(msg: impl ToString) -> Self {
        Self::Constraint(msg.to_string())
    }
}
