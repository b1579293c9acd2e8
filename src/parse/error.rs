use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Extra ')' found!")]
    UnmatchedClose { position: usize },
    #[error("Extra '(' found!")]
    UnmatchedOpen { position: usize },
    #[error("Invalid token! ({slice})")]
    InvalidToken { position: usize, slice: String },
    #[error("No roll expression found")]
    Empty,
}
