use crate::common::*;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[0-9]+[dD][0-9]+", |lex| parse_dice(lex.slice()))]
    Dice((UInt, UInt)),
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Integer(Int),

    /// A `<letters><digits>` resolver modifier, only valid right after dice.
    #[regex(r"[a-zA-Z]+[0-9]+")]
    Modifier,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn as_operator(&self) -> Option<Operator> {
        use Operator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            _ => return None,
        })
    }
}

// Counts too large for `UInt` make the whole slice an error token
fn parse_dice(s: &str) -> Option<(UInt, UInt)> {
    let (count, sides) = s.split_once(|c: char| c == 'd' || c == 'D')?;
    Some((count.parse().ok()?, sides.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        TokenKind::lexer(s).collect()
    }

    #[test]
    fn test_lex_dice() {
        assert_eq!(kinds("4d6"), vec![TokenKind::Dice((4, 6))]);
        assert_eq!(kinds("2D10"), vec![TokenKind::Dice((2, 10))]);
        assert_eq!(
            kinds("4d6k3 e6"),
            vec![TokenKind::Dice((4, 6)), TokenKind::Modifier, TokenKind::Modifier]
        );
    }

    #[test]
    fn test_lex_arithmetic() {
        use TokenKind::*;
        assert_eq!(
            kinds("(2 + 3) * 4 / 1 - 0"),
            vec![
                LeftParen,
                Integer(2),
                Plus,
                Integer(3),
                RightParen,
                Star,
                Integer(4),
                Slash,
                Integer(1),
                Minus,
                Integer(0)
            ]
        );
    }

    #[test]
    fn test_lex_errors() {
        assert_eq!(kinds("#"), vec![TokenKind::Error]);
        assert_eq!(kinds("99999999999d6"), vec![TokenKind::Error]);
        assert!(kinds("4dF").contains(&TokenKind::Error));
    }
}
