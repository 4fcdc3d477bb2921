//! Eastal exploration: `ESTL1`, `ESTL+15`, `ESTL2+1$5`

use std::sync::LazyLock;

use regex::Regex;

use super::{LogHorizon, Outcome};
use crate::dice::{arith, Randomizer};
use crate::tables::{dice_suffix, EastalTable, D6};

static EASTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ESTL(\d+)?([+\-\d]+)?(?:\$(\d+))?$").unwrap());

pub(crate) fn roll(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    let caps = EASTAL_REGEX.captures(command)?;
    if caps.get(1).is_none() && caps.get(2).is_none() && caps.get(3).is_none() {
        return None;
    }

    // digits only, so a failed parse is an overflow
    let cr: i32 = match caps.get(1) {
        Some(m) => m.as_str().parse().unwrap_or(i32::MAX),
        None => 0,
    };
    let modifier = arith::eval_or_zero(caps.get(2).map(|m| m.as_str()));
    let fixed: Option<u32> = match caps.get(3) {
        Some(m) => Some(m.as_str().parse().unwrap_or(u32::MAX)),
        None => None,
    };

    let dice = match fixed {
        Some(value) => vec![value],
        None if cr == 0 => Vec::new(),
        None => randomizer.roll_many(2, D6),
    };
    let sum = dice.iter().fold(0i32, |acc, &d| {
        acc.saturating_add(i32::try_from(d).unwrap_or(i32::MAX))
    });
    let total = EastalTable::clamp(
        sum.saturating_add(cr.saturating_mul(5))
            .saturating_add(modifier),
    );

    let table = system.catalog().eastal();
    Some(Outcome::plain(format!(
        "{}({}{})\n{}",
        table.name(),
        total,
        dice_suffix(&dice),
        table.item(total)
    )))
}
