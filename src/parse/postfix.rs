use super::error::SyntaxError;
use super::lexer::{lexer, Lexer, TokenKind};
use crate::common::*;
use logos_iter::LogosIter;

pub type Postfix = NonEmpty<Token>;

type PResult<T = ()> = Result<T, SyntaxError>;

#[derive(Debug, Copy, Clone)]
enum Pending {
    Operator(Operator),
    Open(usize),
}

/// Reorders an infix expression into postfix form.
///
/// `*` and `/` bind tighter than `+` and `-`; operators of equal strength
/// associate to the left. Parentheses only group and never reach the output.
pub fn to_postfix(expr: &str) -> PResult<Postfix> {
    Converter::new(expr).convert()
}

struct Converter<'a> {
    lexer: Lexer<'a>,
    output: Vec<Token>,
    stack: Vec<Pending>,
}

impl<'a> Converter<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            lexer: lexer(s),
            output: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn convert(mut self) -> PResult<Postfix> {
        while let Some(kind) = self.lexer.next() {
            match kind {
                TokenKind::Integer(x) => self.output.push(Token::Integer(x)),
                TokenKind::Dice((count, sides)) => self.push_dice(count, sides),
                TokenKind::LeftParen => self.stack.push(Pending::Open(self.lexer.span().start)),
                TokenKind::RightParen => self.close_group()?,
                TokenKind::Modifier | TokenKind::Error => return self.invalid_token(),
                op => match op.as_operator() {
                    Some(op) => self.push_operator(op),
                    None => return self.invalid_token(),
                },
            }
        }

        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::Operator(op) => self.output.push(Token::Operator(op)),
                Pending::Open(position) => return Err(SyntaxError::UnmatchedOpen { position }),
            }
        }

        NonEmpty::try_from_vec(self.output).map_err(|_| SyntaxError::Empty)
    }

    fn push_dice(&mut self, count: UInt, sides: UInt) {
        let mut modifiers = Vec::new();
        while self.lexer.peek() == Some(&TokenKind::Modifier) {
            self.lexer.next();
            modifiers.push(self.lexer.slice().to_string());
        }
        self.output
            .push(Token::Dice(DiceGroup::new(count, sides, modifiers.join(" "))));
    }

    fn push_operator(&mut self, op: Operator) {
        while let Some(&Pending::Operator(top)) = self.stack.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.output.push(Token::Operator(top));
            self.stack.pop();
        }
        self.stack.push(Pending::Operator(op));
    }

    fn close_group(&mut self) -> PResult {
        loop {
            match self.stack.pop() {
                Some(Pending::Operator(op)) => self.output.push(Token::Operator(op)),
                Some(Pending::Open(_)) => return Ok(()),
                None => {
                    return Err(SyntaxError::UnmatchedClose {
                        position: self.lexer.span().start,
                    })
                }
            }
        }
    }

    fn invalid_token<T>(&mut self) -> PResult<T> {
        Err(SyntaxError::InvalidToken {
            position: self.lexer.span().start,
            slice: self.lexer.slice().to_string(),
        })
    }
}
