//! Check rolls: `NLH[+m][>=t]`
//!
//! Roll N six-sided dice, add the modifier and compare with the target.
//! Two or more sixes is a critical and all ones is a fumble, whatever the
//! target says.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::{format_modifier, Judgement, LogHorizon, Outcome};
use crate::dice::{arith, Randomizer};
use crate::tables::D6;

/// `3LH`, `2LH+1`, `3LH+1>=10`, `2LH-1=>8+2`
static CHECK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)LH([+\-][+\-*/()\d]*)?(?:(>=|=>)([+\-*/()\d]+))?$").unwrap()
});

/// A parsed check roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollSpec {
    pub count: u32,
    pub modifier: i32,
    /// Target for `>=`, when a comparator was given
    pub target: Option<i32>,
}

impl RollSpec {
    /// Parse a normalized command. Malformed arithmetic is not a match.
    pub fn parse(command: &str) -> Option<Self> {
        let caps = CHECK_REGEX.captures(command)?;

        let count = caps[1].parse().ok()?;
        let modifier = match caps.get(2) {
            Some(m) => arith::eval(m.as_str()).ok()?,
            None => 0,
        };
        let target = match caps.get(4) {
            Some(m) => Some(arith::eval(m.as_str()).ok()?),
            None => None,
        };

        Some(Self {
            count,
            modifier,
            target,
        })
    }
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}LH{}", self.count, format_modifier(self.modifier))?;
        if let Some(target) = self.target {
            write!(f, ">={}", target)?;
        }
        Ok(())
    }
}

/// Judge a check. Critical beats fumble, and both beat the target.
pub fn judge(dice: &[u32], total: i32, target: Option<i32>) -> Option<Judgement> {
    let sixes = dice.iter().filter(|&&d| d == 6).count();
    let ones = dice.iter().filter(|&&d| d == 1).count();

    if sixes >= 2 {
        Some(Judgement::Critical)
    } else if ones >= dice.len() {
        Some(Judgement::Fumble)
    } else {
        target.map(|target| {
            if total >= target {
                Judgement::Success
            } else {
                Judgement::Failure
            }
        })
    }
}

pub(crate) fn roll(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    let spec = RollSpec::parse(command)?;
    if spec.count == 0 || spec.count > system.max_dice() {
        return None;
    }

    let dice = randomizer.roll_many(spec.count, D6);
    let sum: i32 = dice.iter().map(|&d| d as i32).sum();
    let total = sum.saturating_add(spec.modifier);
    let judgement = judge(&dice, total, spec.target);

    let joined: Vec<String> = dice.iter().map(u32::to_string).collect();
    let mut sequence = vec![
        format!("({})", spec),
        format!(
            "{}[{}]{}",
            sum,
            joined.join(","),
            format_modifier(spec.modifier)
        ),
        total.to_string(),
    ];
    if let Some(judgement) = judgement {
        sequence.push(judgement.label(system.catalog().labels()).to_string());
    }

    Some(Outcome::judged(sequence.join(" ＞ "), judgement))
}
