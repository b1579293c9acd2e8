use crate::alias::{apply_output_aliases, AliasName};
use crate::batch::{self, BatchLine};
use crate::command::{GameMode, RollRequest};
use crate::common::{Int, Token};
use crate::config::Config;
use crate::error::RollError;
use crate::eval::{EvalResult, Evaluator};
use crate::mechanics::{self, DerivedStats, WrathDraw, WrathSplit};
use crate::parse::to_postfix;
use crate::roll::{DiceBag, Resolver};
use crate::stringifiers::{AnyStringifier, Stringify};

pub const HELP: &str = "``` Synopsis:
\t!roll xdx [OPTIONS]

\tDescription:

\t\txdx : Denotes how many dice to roll and how many sides the dice have.

\tThe following options are available:

\t\t+ - / * : Static modifier

\t\te# : The explode value.

\t\tk# : How many dice to keep out of the roll, keeping highest value.

\t\tr# : Reroll value.

\t\tt# : Target number for a success.

\t\tf# : Target number for a failure.

\t\t! : Any text after ! will be a comment.
```";

/// Who asked for a roll, for the log.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Caller {
    pub shard: u32,
    pub server: String,
    pub user: String,
}

/// The result of one command, ready to be rendered.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    Roll {
        tally: String,
        total: Int,
        fury: bool,
    },
    Wrath {
        tally: String,
        total: Int,
        wrath: WrathDraw,
        stats: DerivedStats,
    },
    /// A lone `1d6` under Wrath & Glory: the whole pool is the wrath die.
    WrathOnly(WrathDraw),
    Batch(Vec<BatchLine>),
}

/// Runs chat commands end to end.
///
/// Nothing computed for one command outlives it; an engine only holds its
/// configuration and its resolver.
pub struct Engine<R = DiceBag> {
    config: Config,
    resolver: R,
}

impl Default for Engine {
    fn default() -> Self {
        let config = Config::default();
        let resolver = DiceBag::with_limits(rand::thread_rng(), &config.limits);
        Self::new(config, resolver)
    }
}

impl<R: Resolver> Engine<R> {
    pub fn new(config: Config, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handles one raw command and returns the messages to send back.
    ///
    /// Text not addressed to the roller gets no reply. Any failure becomes a
    /// single message and no tally is shown.
    pub fn handle(&mut self, command: &str, caller: &Caller) -> Vec<String> {
        let req = match RollRequest::extract(command, &self.config) {
            Ok(Some(req)) => req,
            Ok(None) => return Vec::new(),
            Err(e) => return vec![self.report(caller, command, e.into())],
        };

        if req.expression.eq_ignore_ascii_case("help") {
            return vec![HELP.to_string()];
        }

        match self.roll(&req) {
            Ok(outcome) => {
                log_outcome(caller, &req, &outcome);
                AnyStringifier::for_request(&req).stringify(&caller.user, &req, &outcome)
            }
            Err(e) => vec![self.report(caller, &req.expression, e)],
        }
    }

    /// Evaluates a request without rendering it.
    ///
    /// The expression is parsed and range checked once, before any dice
    /// are rolled, whether or not it is a batch.
    pub fn roll(&mut self, req: &RollRequest) -> Result<Outcome, RollError> {
        let mut tokens = to_postfix(&req.expression)?.into_vec();
        self.config.limits.check_tokens(&tokens)?;

        if let Some(count) = req.batch {
            let lines = batch::run(count, |_| {
                let res = self.evaluate(&tokens, req)?;
                Ok(BatchLine {
                    tally: apply_output_aliases(&res.tally, &req.aliases),
                    total: res.total,
                })
            })?;
            return Ok(Outcome::Batch(lines));
        }

        if req.mode == GameMode::WrathAndGlory && !mechanics::is_exempt(req.comment.as_deref()) {
            if let Some(split) = mechanics::split_wrath(&mut tokens) {
                let wrath = mechanics::draw_wrath(&mut self.resolver)?;
                if split == WrathSplit::WrathOnly {
                    return Ok(Outcome::WrathOnly(wrath));
                }
                let res = self.evaluate(&tokens, req)?;
                return Ok(Outcome::Wrath {
                    stats: DerivedStats::new(&res.tally, wrath, req.target),
                    tally: apply_output_aliases(&res.tally, &req.aliases),
                    total: res.total,
                    wrath,
                });
            }
        }

        let res = self.evaluate(&tokens, req)?;
        Ok(Outcome::Roll {
            fury: req.mode == GameMode::DarkHeresy && mechanics::righteous_fury(&res.tally),
            tally: apply_output_aliases(&res.tally, &req.aliases),
            total: res.total,
        })
    }

    fn evaluate(&mut self, tokens: &[Token], req: &RollRequest) -> Result<EvalResult, RollError> {
        Evaluator::new(&mut self.resolver)
            .with_modifiers(&req.modifiers)
            .unsorted(req.unsort)
            .evaluate(tokens)
    }

    fn report(&self, caller: &Caller, expression: &str, e: RollError) -> String {
        tracing::debug!(
            shard = caller.shard,
            server = %caller.server,
            user = %caller.user,
            expression,
            error = %e,
            "roll rejected"
        );
        e.user_message()
    }
}

fn log_outcome(caller: &Caller, req: &RollRequest, outcome: &Outcome) {
    let (tally, total) = match outcome {
        Outcome::Roll { tally, total, .. } => (tally.clone(), total.to_string()),
        Outcome::Wrath {
            tally,
            total,
            stats,
            ..
        } => (tally.clone(), format!("{} ({} icons)", total, stats.total())),
        Outcome::WrathOnly(wrath) => (String::new(), format!("wrath {}", wrath.face)),
        Outcome::Batch(lines) => (
            lines
                .iter()
                .map(|l| l.tally.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            lines
                .iter()
                .map(|l| l.total.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    };
    let aliases = req
        .aliases
        .iter()
        .copied()
        .map(AliasName::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!(
        shard = caller.shard,
        server = %caller.server,
        user = %caller.user,
        expression = %req.expression,
        %aliases,
        %tally,
        %total,
        "roll"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::Verdict;
    use crate::roll::CyclingRoller;
    use crate::test_utils::ScriptedResolver;
    use rand::{rngs::StdRng, SeedableRng};
    use std::thread;

    fn caller() -> Caller {
        Caller {
            shard: 0,
            server: "tavern".to_string(),
            user: "ana".to_string(),
        }
    }

    fn idle() -> Engine<ScriptedResolver> {
        Engine::new(Config::default(), ScriptedResolver::default())
    }

    fn engine(faces: impl IntoIterator<Item = Vec<u32>>) -> Engine<ScriptedResolver> {
        Engine::new(Config::default(), ScriptedResolver::new(faces))
    }

    #[test]
    fn test_handle_standard() {
        let out = engine([vec![3, 4]]).handle("!roll 2d6 + 1", &caller());
        assert_eq!(out, vec!["ana Roll: `[3, 4]` Result: 8"]);
    }

    #[test]
    fn test_ignores_other_text() {
        assert!(idle().handle("good morning", &caller()).is_empty());
    }

    #[test]
    fn test_help() {
        let out = idle().handle("!roll help", &caller());
        assert_eq!(out, vec![HELP]);
    }

    #[test]
    fn test_errors_are_one_line() {
        let mut e = idle();
        assert_eq!(
            e.handle("!roll 1d101", &caller()),
            vec!["Please roll dice up to d100"]
        );
        assert_eq!(
            e.handle("!roll (1 + 2", &caller()),
            vec!["Error: Extra '(' found!"]
        );
        assert_eq!(
            e.handle("!roll 6 / (3 - 3)", &caller()),
            vec!["Error: Tried to divide by zero!"]
        );
        assert_eq!(
            e.handle("!roll 21 1d6", &caller()),
            vec!["Roll set must be between 2-20"]
        );
        assert!(e.resolver.calls.is_empty());
    }

    #[test]
    fn test_range_checked_before_rolling() {
        let mut e = idle();
        for cmd in ["!roll 1d1", "!roll 501d6", "!roll 2d6 + 1d101", "!roll 3 1d6 + 1d101"] {
            let out = e.handle(cmd, &caller());
            assert_eq!(out.len(), 1, "{}", cmd);
            assert!(!out[0].contains('`'), "{}", cmd);
        }
        assert!(e.resolver.calls.is_empty());
    }

    #[test]
    fn test_batch() {
        let out = engine([vec![2], vec![5], vec![1]]).handle("!roll 3 d6 + 1 ! volley", &caller());
        assert_eq!(
            out,
            vec!["ana Rolls:\n`[2]` Result: 3\n`[5]` Result: 6\n`[1]` Result: 2\n Reason: `volley`"]
        );
    }

    #[test]
    fn test_batch_aborts_on_failure() {
        let mut e = Engine::new(Config::default(), ScriptedResolver::default().failing_on(1));
        let out = e.handle("!roll 3 1d6", &caller());
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("Error: Roller encountered error with \"1d6\""));
    }

    #[test]
    fn test_wrath_and_glory() {
        // Wrath die is drawn first, then the remaining pool of four.
        let mut e = engine([vec![6], vec![4, 5, 6, 6]]);
        let req = RollRequest::extract("!roll wng 5d6 dn8", e.config()).unwrap().unwrap();
        let outcome = e.roll(&req).unwrap();
        assert_eq!(
            outcome,
            Outcome::Wrath {
                tally: "[4, 5, 6, 6]".to_string(),
                total: 21,
                wrath: WrathDraw { face: 6 },
                stats: DerivedStats {
                    icons: 2,
                    exalted_icons: 3,
                    exalted_value: 6,
                    verdict: Some(Verdict::Passed),
                },
            }
        );
        assert_eq!(e.resolver.calls[1].0, 4);
    }

    #[test]
    fn test_wrath_verdict_fails() {
        let mut e = engine([vec![6], vec![4, 5, 6, 6]]);
        let out = e.handle("!roll wng 5d6 dn9", &caller());
        assert!(out[0].contains("**TEST FAILED!**"));
        assert_eq!(out[1], "Combat critical hit and one point of Glory!");

        let mut e = engine([vec![6], vec![6, 6, 6, 6]]);
        let out = e.handle("!roll wng 5d6 dn99999999999", &caller());
        assert!(out[0].contains("**TEST FAILED!**"), "{:?}", out);
    }

    #[test]
    fn test_wrath_only() {
        let mut e = engine([vec![1]]);
        let out = e.handle("!roll wng 1d6", &caller());
        assert_eq!(out, vec!["ana Roll: Wrath: `1`"]);
        assert_eq!(e.resolver.calls.len(), 1);
    }

    #[test]
    fn test_wrath_exempt() {
        let mut e = engine([vec![6, 6, 6]]);
        let req = RollRequest::extract("!roll wng 3d6 ! soak", e.config())
            .unwrap()
            .unwrap();
        assert!(matches!(e.roll(&req).unwrap(), Outcome::Roll { total: 18, .. }));
    }

    #[test]
    fn test_dark_heresy_fury() {
        let out = engine([vec![10, 10]]).handle("!roll dh 2d10", &caller());
        assert_eq!(
            out,
            vec![
                "ana Roll: `[10, 10]` Result: 20",
                "`Righteous Fury Activated!` Purge the Heretic!",
            ]
        );

        let out = engine([vec![10, 10]]).handle("!roll 2d10", &caller());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_fudge_round_trip() {
        // Faces 1, 2, 3, 1: one success less two failures
        let bag = DiceBag::new(CyclingRoller::new(1, 1), 1000);
        let out = Engine::new(Config::default(), bag).handle("!roll 4dF", &caller());
        assert_eq!(out, vec!["ana Roll: `[-,  , +, -]` Result: -1"]);
    }

    fn wrath_stats(command: &str, faces: [Vec<u32>; 3]) -> DerivedStats {
        let mut e = engine(faces);
        let req = RollRequest::extract(command, e.config()).unwrap().unwrap();
        match e.roll(&req).unwrap() {
            Outcome::Wrath { stats, .. } => stats,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    fn fury(command: &str) -> bool {
        let mut e = engine([vec![3], vec![10]]);
        let req = RollRequest::extract(command, e.config()).unwrap().unwrap();
        match e.roll(&req).unwrap() {
            Outcome::Roll { fury, .. } => fury,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_unsort_leaves_stats_alone() {
        // Wrath 2, then 2d6 of fours, then a d10 ten
        let faces = || [vec![2], vec![4, 4], vec![10]];
        let sorted = wrath_stats("!roll wng 3d6 + 1d10 ! attack", faces());
        let shuffled = wrath_stats("!roll wng 3d6 + 1d10 ! unsort attack", faces());
        assert_eq!(sorted, shuffled);
        assert_eq!(shuffled.icons, 2);
        assert_eq!(shuffled.exalted_icons, 0);

        // The ten is on the d12, even when shown in the d10's slot
        assert!(!fury("!roll dh 1d10 + 1d12"));
        assert!(!fury("!roll dh 1d10 + 1d12 ! unsort"));
    }

    #[test]
    fn test_unsorted_fudge_keeps_symbols() {
        let out = engine([vec![1, 2], vec![5]]).handle("!roll 2dF + 1d10 ! unsort", &caller());
        assert!(out[0].starts_with("ana Roll: `[5,  ][-]`"), "{:?}", out);
    }

    #[test]
    fn test_simple_output() {
        let out = engine([vec![4]]).handle("!roll s d20 + 3", &caller());
        assert_eq!(out, vec!["ana Roll Result: 7"]);
    }

    #[test]
    fn test_concurrent_commands() {
        let handles: Vec<_> = (0..8u64)
            .map(|seed| {
                thread::spawn(move || {
                    let config = Config::default();
                    let bag = DiceBag::with_limits(StdRng::seed_from_u64(seed), &config.limits);
                    let mut e = Engine::new(config, bag);
                    let req = RollRequest::extract("!roll 10d6 + 2", e.config())
                        .unwrap()
                        .unwrap();
                    (0..50)
                        .map(|_| match e.roll(&req).unwrap() {
                            Outcome::Roll { total, .. } => total,
                            other => panic!("unexpected outcome {:?}", other),
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let totals = handle.join().unwrap();
            assert!(totals.iter().all(|t| (12..=62).contains(t)));
        }
    }
}
