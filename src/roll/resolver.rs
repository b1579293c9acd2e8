use super::{error::ResolverError, roller::Roller};
use crate::common::{Int, UInt};
use crate::config::Limits;
use logos::Logos;

pub type DefaultRoller = rand::rngs::ThreadRng;

type RResult<T> = Result<T, ResolverError>;

/// What one dice group came to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Resolution {
    pub total: Int,
    /// Every face rolled, in roll order.
    pub faces: Vec<UInt>,
}

/// Rolls one dice group, applying its modifier text.
pub trait Resolver {
    fn roll(&mut self, count: UInt, sides: UInt, modifiers: &str) -> RResult<Resolution>;

    /// Reorders faces for display; never called on anything that feeds a total.
    fn shuffle(&mut self, faces: &mut [UInt]);
}

#[derive(Logos, Debug, Copy, Clone, PartialEq, Eq)]
enum ModifierKind {
    #[regex(r"[rR][0-9]+", value)]
    Reroll(UInt),
    #[regex(r"[eE][0-9]+", value)]
    Explode(UInt),
    #[regex(r"[kK][0-9]+", value)]
    Keep(UInt),
    #[regex(r"[tT][0-9]+", value)]
    Target(UInt),
    #[regex(r"[fF][0-9]+", value)]
    Failure(UInt),

    #[regex(r"[ \t]+", logos::skip)]
    #[error]
    Error,
}

fn value(lex: &mut logos::Lexer<ModifierKind>) -> Option<UInt> {
    lex.slice()[1..].parse().ok()
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
struct Modifiers {
    reroll: Option<UInt>,
    explode: Option<UInt>,
    keep: Option<UInt>,
    target: Option<UInt>,
    failure: Option<UInt>,
}

impl Modifiers {
    fn parse(s: &str, sides: UInt) -> RResult<Self> {
        let mut ret = Self::default();
        let mut lex = ModifierKind::lexer(s);
        while let Some(kind) = lex.next() {
            match kind {
                ModifierKind::Reroll(n) => ret.reroll = Some(n),
                ModifierKind::Explode(n) => ret.explode = Some(n),
                ModifierKind::Keep(n) => ret.keep = Some(n),
                ModifierKind::Target(n) => ret.target = Some(n),
                ModifierKind::Failure(n) => ret.failure = Some(n),
                ModifierKind::Error => {
                    return Err(ResolverError::UnknownModifier(lex.slice().to_string()))
                }
            }
        }

        if matches!(ret.reroll, Some(r) if r >= sides) {
            return Err(ResolverError::constraint(format!(
                "cannot reroll every face of a d{}",
                sides
            )));
        }
        if matches!(ret.explode, Some(e) if e < 2) {
            return Err(ResolverError::constraint("explode value must be 2 or greater"));
        }
        Ok(ret)
    }

    fn counts_successes(&self) -> bool {
        self.target.is_some() || self.failure.is_some()
    }
}

/// The stock resolver: a [`Roller`] plus reroll, explode, keep, target and
/// failure modifiers.
pub struct DiceBag<R = DefaultRoller> {
    roller: R,
    max_rolls: usize,
}

impl<R: Roller> DiceBag<R> {
    pub fn new(roller: R, max_rolls: usize) -> Self {
        Self { roller, max_rolls }
    }

    pub fn with_limits(roller: R, limits: &Limits) -> Self {
        Self::new(roller, limits.max_rolls)
    }

    fn count_rolls(&self, rolls: &mut usize, n: usize) -> RResult<()> {
        *rolls += n;
        if *rolls > self.max_rolls {
            Err(ResolverError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    fn roll_die(&mut self, rolls: &mut usize, sides: UInt, reroll: Option<UInt>) -> RResult<UInt> {
        self.count_rolls(rolls, 1)?;
        let mut face = self.roller.roll(sides);
        while reroll.map_or(false, |r| face <= r) {
            self.count_rolls(rolls, 1)?;
            face = self.roller.roll(sides);
        }
        Ok(face)
    }
}

impl Default for DiceBag {
    fn default() -> Self {
        Self::with_limits(rand::thread_rng(), &Limits::default())
    }
}

impl<R: Roller> Resolver for DiceBag<R> {
    fn roll(&mut self, count: UInt, sides: UInt, modifiers: &str) -> RResult<Resolution> {
        let mods = Modifiers::parse(modifiers, sides)?;
        let mut rolls = 0;

        self.count_rolls(&mut rolls, count as usize)?;
        let mut faces = self.roller.roll_pool(count, sides);

        if let Some(r) = mods.reroll {
            for i in 0..faces.len() {
                if faces[i] <= r {
                    faces[i] = self.roll_die(&mut rolls, sides, mods.reroll)?;
                }
            }
        }

        if let Some(e) = mods.explode {
            // Extra dice land at the end and are checked in turn, so explosions chain.
            let mut i = 0;
            while i < faces.len() {
                if faces[i] >= e {
                    let extra = self.roll_die(&mut rolls, sides, mods.reroll)?;
                    faces.push(extra);
                }
                i += 1;
            }
        }

        let mut kept = faces.clone();
        if let Some(k) = mods.keep {
            kept.sort_unstable_by(|a, b| b.cmp(a));
            kept.truncate(k as usize);
        }

        let total = if mods.counts_successes() {
            let hits = mods
                .target
                .map_or(0, |t| kept.iter().filter(|&&f| f >= t).count());
            let misses = mods
                .failure
                .map_or(0, |f| kept.iter().filter(|&&x| x <= f).count());
            hits as Int - misses as Int
        } else {
            kept.iter().map(|&f| Int::from(f)).sum()
        };

        tracing::trace!(count, sides, modifiers, ?faces, total, "resolved dice group");
        Ok(Resolution { total, faces })
    }

    fn shuffle(&mut self, faces: &mut [UInt]) {
        self.roller.shuffle(faces)
    }
}
