//! Ruleset post-processing: the Wrath & Glory wrath die and icon
//! accounting, and the Dark Heresy righteous fury check.

use crate::common::{Token, UInt};
use crate::error::RollError;
use crate::roll::{Resolver, ResolverError, Tally};
use std::fmt;

/// Comment keywords that keep a d6 pool whole.
const EXEMPT_KEYWORDS: [&str; 3] = ["soak", "exempt", "dmg"];

/// The secondary d6 of a Wrath & Glory roll.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WrathDraw {
    pub face: UInt,
}

impl WrathDraw {
    pub fn is_icon(self) -> bool {
        matches!(self.face, 4 | 5)
    }

    pub fn is_exalted(self) -> bool {
        self.face == 6
    }

    /// A six outranks a one; anything else is quiet.
    pub fn notice(self) -> Option<Notice> {
        match self.face {
            6 => Some(Notice::Glory),
            1 => Some(Notice::Complication),
            _ => None,
        }
    }
}

/// What [`split_wrath`] did to a postfix sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WrathSplit {
    /// One die moved out of a larger pool.
    Pool,
    /// The whole roll was a single d6; only the wrath die is reported.
    WrathOnly,
}

/// Takes one die out of the last d6 group for the wrath die.
///
/// A group left with no dice becomes the literal `0` so the expression
/// still evaluates. Returns `None` when there is no d6 group.
pub fn split_wrath(postfix: &mut [Token]) -> Option<WrathSplit> {
    let whole = postfix.len() == 1;
    let slot = postfix
        .iter_mut()
        .rev()
        .find(|t| matches!(t, Token::Dice(dice) if dice.sides == 6 && dice.count > 0))?;

    let remaining = match slot {
        Token::Dice(dice) => {
            dice.count -= 1;
            dice.count
        }
        _ => return None,
    };

    if remaining > 0 {
        return Some(WrathSplit::Pool);
    }
    *slot = Token::Integer(0);
    Some(if whole {
        WrathSplit::WrathOnly
    } else {
        WrathSplit::Pool
    })
}

pub fn draw_wrath<R: Resolver + ?Sized>(resolver: &mut R) -> Result<WrathDraw, RollError> {
    let res = resolver
        .roll(1, 6, "")
        .map_err(|e| RollError::resolver("1d6", e))?;
    let face = res
        .faces
        .first()
        .copied()
        .or_else(|| UInt::try_from(res.total).ok())
        .ok_or_else(|| RollError::resolver("1d6", ResolverError::constraint("no face rolled")))?;
    Ok(WrathDraw { face })
}

pub fn is_exempt(comment: Option<&str>) -> bool {
    comment.map_or(false, |c| {
        let c = c.to_lowercase();
        EXEMPT_KEYWORDS.iter().any(|k| c.contains(k))
    })
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Verdict {
    Passed,
    Failed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Passed => "**TEST PASSED!**",
            Self::Failed => "**TEST FAILED!**",
        })
    }
}

/// Icon accounting for one Wrath & Glory roll.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DerivedStats {
    pub icons: usize,
    pub exalted_icons: usize,
    pub exalted_value: usize,
    pub verdict: Option<Verdict>,
}

impl DerivedStats {
    /// Fours and fives are icons, sixes are exalted icons worth two.
    /// Only d6 faces count.
    pub fn new(tally: &Tally, wrath: WrathDraw, target: Option<UInt>) -> Self {
        let icons = tally.count_on(6, 4) + tally.count_on(6, 5) + usize::from(wrath.is_icon());
        let exalted_icons = tally.count_on(6, 6) + usize::from(wrath.is_exalted());
        let mut stats = Self {
            icons,
            exalted_icons,
            exalted_value: exalted_icons * 2,
            verdict: None,
        };
        let total = stats.total();
        stats.verdict = target.map(|dn| {
            if total >= dn as usize {
                Verdict::Passed
            } else {
                Verdict::Failed
            }
        });
        stats
    }

    /// Icons counted toward a difficulty, exalted ones at double value.
    pub fn total(&self) -> usize {
        self.icons + self.exalted_value
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Notice {
    Glory,
    Complication,
    RighteousFury,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Glory => "Combat critical hit and one point of Glory!",
            Self::Complication => "Complication!",
            Self::RighteousFury => "`Righteous Fury Activated!` Purge the Heretic!",
        })
    }
}

/// A natural ten on any d10. Several tens still make one fury.
pub fn righteous_fury(tally: &Tally) -> bool {
    tally.count_on(10, 10) > 0
}
