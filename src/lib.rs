pub mod alias;
pub mod batch;
pub mod command;
pub mod common;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod mechanics;
pub mod parse;
pub mod roll;
pub mod stringifiers;

pub use command::{GameMode, RollRequest};
pub use config::{Config, Limits};
pub use engine::{Caller, Engine, Outcome};
pub use error::{ArithmeticError, RangeError, RollError};
pub use eval::{EvalResult, Evaluator};

pub type Result<T> = std::result::Result<T, RollError>;

/// Rolls a bare expression such as `4d6 k3 + 2` with the default limits.
pub fn roll(expr: &str) -> Result<EvalResult> {
    let postfix = parse::to_postfix(expr)?;
    let limits = Limits::default();
    limits.check_tokens(postfix.iter())?;
    let mut bag = roll::DiceBag::with_limits(rand::thread_rng(), &limits);
    Evaluator::new(&mut bag).evaluate(&postfix)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::common::{Int, UInt};
    use crate::roll::{Resolution, Resolver, ResolverError};
    use std::collections::VecDeque;

    /// Hands out pre-set faces in order and records every call.
    ///
    /// With nothing scripted, every die shows 1. Modifier text is recorded
    /// but not applied. Shuffling reverses.
    #[derive(Debug, Default)]
    pub struct ScriptedResolver {
        faces: VecDeque<Vec<UInt>>,
        fail_on: Option<usize>,
        pub calls: Vec<(UInt, UInt, String)>,
    }

    impl ScriptedResolver {
        pub fn new(faces: impl IntoIterator<Item = Vec<UInt>>) -> Self {
            Self {
                faces: faces.into_iter().collect(),
                ..Self::default()
            }
        }

        /// Makes the `call`th call (from zero) fail.
        pub fn failing_on(mut self, call: usize) -> Self {
            self.fail_on = Some(call);
            self
        }
    }

    impl Resolver for ScriptedResolver {
        fn roll(
            &mut self,
            count: UInt,
            sides: UInt,
            modifiers: &str,
        ) -> Result<Resolution, ResolverError> {
            let call = self.calls.len();
            self.calls.push((count, sides, modifiers.to_string()));
            if self.fail_on == Some(call) {
                return Err(ResolverError::constraint("scripted failure"));
            }
            let faces = self
                .faces
                .pop_front()
                .unwrap_or_else(|| vec![1; count as usize]);
            let total = faces.iter().map(|&f| Int::from(f)).sum();
            Ok(Resolution { total, faces })
        }

        fn shuffle(&mut self, faces: &mut [UInt]) {
            faces.reverse()
        }
    }
}
