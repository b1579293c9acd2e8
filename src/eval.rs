use crate::common::*;
use crate::error::{ArithmeticError, RollError};
use crate::parse::SyntaxError;
use crate::roll::{DieTally, Resolver, Tally};

type EResult<T> = Result<T, RollError>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EvalResult {
    pub total: Int,
    pub tally: Tally,
}

/// Walks a postfix token sequence, resolving dice through a [`Resolver`]
/// and collecting every face into a [`Tally`].
pub struct Evaluator<'a, R: ?Sized> {
    resolver: &'a mut R,
    modifiers: &'a str,
    unsort: bool,
}

impl<'a, R: Resolver + ?Sized> Evaluator<'a, R> {
    pub fn new(resolver: &'a mut R) -> Self {
        Self {
            resolver,
            modifiers: "",
            unsort: false,
        }
    }

    /// Modifier text appended to every dice group.
    pub fn with_modifiers(mut self, modifiers: &'a str) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Shuffle the finished tally for display.
    pub fn unsorted(mut self, unsort: bool) -> Self {
        self.unsort = unsort;
        self
    }

    pub fn evaluate(&mut self, postfix: &[Token]) -> EResult<EvalResult> {
        let mut stack: Vec<Int> = Vec::new();
        let mut tally = Tally::default();

        for (position, token) in postfix.iter().enumerate() {
            match token {
                Token::Integer(x) => stack.push(*x),
                Token::Dice(dice) => {
                    let (total, faces) = self.resolve(dice)?;
                    stack.push(total);
                    tally.push(faces);
                }
                Token::Operator(op) => {
                    let rhs = stack.pop();
                    let lhs = stack.pop();
                    match (lhs, rhs) {
                        (Some(lhs), Some(rhs)) => stack.push(apply(*op, lhs, rhs)?),
                        _ => return Err(ArithmeticError::MissingOperand(*op).into()),
                    }
                }
                paren @ (Token::OpenParen | Token::CloseParen) => {
                    return Err(SyntaxError::InvalidToken {
                        position,
                        slice: paren.to_string(),
                    }
                    .into())
                }
            }
        }

        let total = match stack.as_slice() {
            [total] => *total,
            [] => return Err(SyntaxError::Empty.into()),
            _ => return Err(ArithmeticError::ExtraOperands.into()),
        };

        if self.unsort {
            let resolver = &mut *self.resolver;
            tally.shuffle_display_with(|order| resolver.shuffle(order));
        }

        Ok(EvalResult { total, tally })
    }

    fn resolve(&mut self, dice: &DiceGroup) -> EResult<(Int, DieTally)> {
        let dice = dice.with_suffix(self.modifiers);
        let res = self
            .resolver
            .roll(dice.count, dice.sides, &dice.modifiers)
            .map_err(|e| RollError::resolver(&dice, e))?;
        Ok((res.total, DieTally::new(dice.sides, res.faces)))
    }
}

/// Integer arithmetic; division truncates toward zero.
fn apply(op: Operator, lhs: Int, rhs: Int) -> Result<Int, ArithmeticError> {
    let ret = match op {
        Operator::Add => lhs.checked_add(rhs),
        Operator::Sub => lhs.checked_sub(rhs),
        Operator::Mul => lhs.checked_mul(rhs),
        Operator::Div => {
            if rhs == 0 {
                return Err(ArithmeticError::DivideByZero);
            }
            lhs.checked_div(rhs)
        }
    };
    ret.ok_or(ArithmeticError::Overflow(op))
}
