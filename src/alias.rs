//! Shorthand notations rewritten into plain dice expressions, plus the
//! symbol tables some of them use to display their faces.

use crate::common::UInt;
use crate::roll::Tally;
use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AliasName {
    WorldOfDarkness,
    Fudge,
    Warhammer,
    DoubleDigit,
}

impl AliasName {
    /// Name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorldOfDarkness => "WoD",
            Self::Fudge => "Fudge",
            Self::Warhammer => "Warhammer",
            Self::DoubleDigit => "Double Digit",
        }
    }

    /// Display text for a face of a `sides`-sided die, if this alias renames it.
    fn symbol(self, sides: UInt, face: UInt) -> Option<&'static str> {
        match (self, sides, face) {
            (Self::Fudge, 3, 1) => Some("-"),
            (Self::Fudge, 3, 2) => Some(" "),
            (Self::Fudge, 3, 3) => Some("+"),
            _ => None,
        }
    }
}

struct Rule {
    name: AliasName,
    pattern: Regex,
    rewrite: &'static str,
}

impl Rule {
    fn new(name: AliasName, pattern: &str, rewrite: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            rewrite,
        }
    }
}

static RULES: LazyLock<[Rule; 4]> = LazyLock::new(|| {
    [
        Rule::new(
            AliasName::WorldOfDarkness,
            r"(?i)\b(\d+)WoD(\d+)\b",
            "${1}d10 f1 t${2}",
        ),
        Rule::new(AliasName::Fudge, r"(?i)\b(\d+)dF\b", "${1}d3 f1 t3"),
        Rule::new(AliasName::Warhammer, r"(?i)\b(\d+)wh(\d+)\+", "${1}d6 t${2}"),
        Rule::new(
            AliasName::DoubleDigit,
            r"(?i)\bdd(\d)(\d)\b",
            "(1d${1} * 10) + 1d${2}",
        ),
    ]
});

/// Rewrites every known shorthand in `text`.
///
/// Rules are tested against the text as typed, so the output of one rule
/// never triggers another. Returns the rewritten text and the rules that
/// fired, in table order.
pub fn apply_input_aliases(text: &str) -> (String, Vec<AliasName>) {
    let mut applied = Vec::new();
    let mut out = text.to_string();
    for rule in RULES.iter().filter(|rule| rule.pattern.is_match(text)) {
        applied.push(rule.name);
        out = rule.pattern.replace_all(&out, rule.rewrite).into_owned();
    }
    (out, applied)
}

/// Renders `tally`, swapping in the face symbols of any alias that has them.
pub fn apply_output_aliases(tally: &Tally, applied: &[AliasName]) -> String {
    tally.render_with(|sides, face| {
        applied
            .iter()
            .find_map(|name| name.symbol(sides, face))
            .map_or_else(|| face.to_string(), str::to_string)
    })
}
