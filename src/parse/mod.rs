mod error;
mod lexer;
mod postfix;

pub use error::SyntaxError;
pub use postfix::{to_postfix, Postfix};
