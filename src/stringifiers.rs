use crate::batch::BatchLine;
use crate::command::RollRequest;
use crate::common::Int;
use crate::engine::Outcome;
use crate::mechanics::{DerivedStats, Notice, WrathDraw};

/// Turns a finished roll into the chat messages sent back, one per entry.
#[enum_dispatch::enum_dispatch]
pub trait Stringify {
    fn stringify(&self, user: &str, req: &RollRequest, outcome: &Outcome) -> Vec<String> {
        let comment = req.comment.as_deref();
        match outcome {
            Outcome::Roll { tally, total, fury } => {
                let mut out = vec![self.str_roll(user, tally, *total, comment)];
                if *fury {
                    out.push(Notice::RighteousFury.to_string());
                }
                out
            }
            Outcome::Wrath {
                tally,
                wrath,
                stats,
                ..
            } => {
                let mut out = vec![self.str_wrath(user, tally, *wrath, stats)];
                out.extend(comment.map(|c| self.str_reason(c)));
                out.extend(wrath.notice().map(|n| n.to_string()));
                out
            }
            Outcome::WrathOnly(wrath) => {
                let mut out = vec![self.str_wrath_only(user, *wrath)];
                out.extend(comment.map(|c| self.str_reason(c)));
                out
            }
            Outcome::Batch(lines) => vec![self.str_batch(user, lines, comment)],
        }
    }

    fn str_roll(&self, user: &str, tally: &str, total: Int, comment: Option<&str>) -> String {
        let mut out = format!("{} Roll: `{}` Result: {}", user, tally, total);
        if let Some(c) = comment {
            out.push_str(&format!(" Reason: `{}`", c));
        }
        out
    }

    fn str_wrath(&self, user: &str, tally: &str, wrath: WrathDraw, stats: &DerivedStats) -> String {
        let verdict = stats
            .verdict
            .map(|v| format!("{} ", v))
            .unwrap_or_default();
        format!(
            "{} Roll: `{}` Wrath: `{}` | {}TOTAL - Icons: `{}` Exalted Icons: `{} (Value:{})`",
            user, tally, wrath.face, verdict, stats.icons, stats.exalted_icons, stats.exalted_value
        )
    }

    fn str_wrath_only(&self, user: &str, wrath: WrathDraw) -> String {
        format!("{} Roll: Wrath: `{}`", user, wrath.face)
    }

    fn str_reason(&self, comment: &str) -> String {
        format!("Roll Reason: `{}`", comment)
    }

    fn str_batch(&self, user: &str, lines: &[BatchLine], comment: Option<&str>) -> String {
        let mut out = format!("{} Rolls:", user);
        for line in lines {
            out.push_str(&format!("\n`{}` Result: {}", line.tally, line.total));
        }
        if let Some(c) = comment {
            out.push_str(&format!("\n Reason: `{}`", c));
        }
        out
    }
}

/// Full output: every die face in backticks.
#[derive(Default, Debug)]
pub struct MarkdownStringifier;

impl Stringify for MarkdownStringifier {}

/// Totals only.
#[derive(Default, Debug)]
pub struct SimpleStringifier;

impl Stringify for SimpleStringifier {
    fn str_roll(&self, user: &str, _tally: &str, total: Int, comment: Option<&str>) -> String {
        let mut out = format!("{} Roll Result: {}", user, total);
        if let Some(c) = comment {
            out.push_str(&format!(" Reason: `{}`", c));
        }
        out
    }
}

#[enum_dispatch::enum_dispatch(Stringify)]
#[derive(Debug)]
pub enum AnyStringifier {
    MarkdownStringifier,
    SimpleStringifier,
}

impl AnyStringifier {
    pub fn for_request(req: &RollRequest) -> Self {
        if req.simple {
            SimpleStringifier.into()
        } else {
            MarkdownStringifier.into()
        }
    }
}
