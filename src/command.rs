use crate::alias::{apply_input_aliases, AliasName};
use crate::common::UInt;
use crate::config::Config;
use crate::error::RangeError;
use regex::Regex;
use std::sync::LazyLock;

static BATCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s+[^\s+\-*/]").unwrap());
static IMPLICIT_DIE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?i)d\d").unwrap());
static TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)dn\s?(\d+)").unwrap());
static UNIVERSAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\s+[a-z]+\d+\b)+\s*$").unwrap());

/// Which tabletop ruleset post-processes a roll.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameMode {
    #[default]
    Standard,
    /// `wng`: wrath die, icons and difficulty checks.
    WrathAndGlory,
    /// `dh`: righteous fury on a natural ten.
    DarkHeresy,
}

/// Everything one chat command asks for, pulled apart from its text.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RollRequest {
    /// The bare arithmetic and dice expression.
    pub expression: String,
    pub batch: Option<UInt>,
    /// Modifier text appended to every dice group.
    pub modifiers: String,
    /// Difficulty from a `dn<N>` token.
    pub target: Option<UInt>,
    pub comment: Option<String>,
    pub mode: GameMode,
    pub simple: bool,
    pub unsort: bool,
    pub aliases: Vec<AliasName>,
}

impl RollRequest {
    /// Builds a request from raw command text.
    ///
    /// Returns `Ok(None)` when the text is not addressed to the roller at
    /// all. A batch count outside the configured range fails here, before
    /// anything is parsed or rolled.
    pub fn extract(command: &str, config: &Config) -> Result<Option<Self>, RangeError> {
        let (text, aliases) = apply_input_aliases(command);
        let mut rest = match strip_prefix(&text, &config.prefix) {
            Some(rest) => rest,
            None => return Ok(None),
        };

        let mut req = Self {
            aliases,
            ..Self::default()
        };

        while let Some((flag, tail)) = next_flag(rest) {
            match flag {
                Flag::Wng => req.mode = GameMode::WrathAndGlory,
                Flag::Dh => req.mode = GameMode::DarkHeresy,
                Flag::Simple => req.simple = true,
            }
            rest = tail;
        }

        if let Some(caps) = BATCH.captures(rest) {
            let digits = &caps[1];
            // Anything too long for u64 is out of range anyway
            let count = digits.parse().unwrap_or(u64::MAX);
            req.batch = Some(config.limits.check_batch(count)?);
            rest = &rest[caps.get(1).map_or(0, |m| m.end())..];
        }

        let mut expr = rest.trim_start().to_string();
        if IMPLICIT_DIE.is_match(&expr) {
            expr.insert(0, '1');
        }

        if let Some((roll, comment)) = expr.split_once('!') {
            let comment = comment.trim();
            if !comment.is_empty() {
                req.unsort = comment.contains("unsort");
                req.comment = Some(comment.to_string());
            }
            expr = roll.to_string();
        }

        if let Some(caps) = TARGET.captures(&expr) {
            // Saturate so an oversized difficulty still fails
            req.target = Some(caps[1].parse().unwrap_or(UInt::MAX));
            expr = TARGET.replace(&expr, "").into_owned();
        }

        if let Some(m) = UNIVERSAL.find(&expr) {
            req.modifiers = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            expr.truncate(m.start());
        }

        req.expression = expr.trim().to_string();
        Ok(Some(req))
    }
}

enum Flag {
    Wng,
    Dh,
    Simple,
}

/// `Some(rest)` when `text` opens with `prefix` as a whole word.
fn strip_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = &text[prefix.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}

fn next_flag(s: &str) -> Option<(Flag, &str)> {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace)?;
    let flag = match s[..end].to_ascii_lowercase().as_str() {
        "wng" => Flag::Wng,
        "dh" => Flag::Dh,
        "s" => Flag::Simple,
        _ => return None,
    };
    Some((flag, &s[end..]))
}
