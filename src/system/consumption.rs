//! Consumption table commands: `PCT1`, `ECT2+1`, `GCT3-1`, `CCT3$5`, `ESCT`

use std::sync::LazyLock;

use regex::Regex;

use super::{LogHorizon, Outcome};
use crate::dice::{arith, Randomizer};
use crate::tables::ConsumptionKind;

static CONSUMPTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(P|E|G|C|ES|CS)CT(\d+)?([+\-\d]+)?(?:\$(\d+))?$").unwrap()
});

pub(crate) fn roll(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    let caps = CONSUMPTION_REGEX.captures(command)?;

    let kind = ConsumptionKind::from_code(&caps[1])?;
    // digits only, so a failed parse is an overflow
    let cr = match caps.get(2) {
        Some(m) => m.as_str().parse().unwrap_or(i32::MAX),
        None => 0,
    };
    let modifier = arith::eval_or_zero(caps.get(3).map(|m| m.as_str()));
    let fixed = match caps.get(4) {
        Some(m) => Some(m.as_str().parse().unwrap_or(i32::MAX)),
        None => None,
    };

    let table = system.catalog().consumption(kind);
    Some(Outcome::plain(table.roll(cr, modifier, fixed, randomizer)))
}
