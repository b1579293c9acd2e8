use std::fmt::{self, Write};

pub type Int = i64;
pub type UInt = u32;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

/// A `<count>d<sides>` group with the modifier text that followed it.
///
/// The modifiers are opaque here; they are handed to the
/// [`Resolver`](crate::roll::Resolver) as written.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DiceGroup {
    pub count: UInt,
    pub sides: UInt,
    pub modifiers: String,
}

impl DiceGroup {
    pub fn new(count: UInt, sides: UInt, modifiers: impl Into<String>) -> Self {
        Self {
            count,
            sides,
            modifiers: modifiers.into(),
        }
    }

    /// Returns a copy with `suffix` appended to the modifier text.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let modifiers = [self.modifiers.as_str(), suffix]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(self.count, self.sides, modifiers)
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if !self.modifiers.is_empty() {
            write!(f, " {}", self.modifiers)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    Integer(Int),
    Dice(DiceGroup),
    Operator(Operator),
    OpenParen,
    CloseParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(x) => fmt::Display::fmt(x, f),
            Self::Dice(dice) => fmt::Display::fmt(dice, f),
            Self::Operator(op) => fmt::Display::fmt(op, f),
            Self::OpenParen => f.write_char('('),
            Self::CloseParen => f.write_char(')'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert!(Operator::Mul.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Mul.precedence(), Operator::Div.precedence());
        assert_eq!(Operator::Add.precedence(), Operator::Sub.precedence());
    }

    #[test]
    fn test_dice_suffix() {
        let dice = DiceGroup::new(4, 6, "k3");
        assert_eq!(dice.with_suffix(" e6").modifiers, "k3 e6");
        assert_eq!(dice.with_suffix("").to_string(), "4d6 k3");
        assert_eq!(DiceGroup::new(2, 10, "").with_suffix("t7").to_string(), "2d10 t7");
    }
}
