//! Treasure table commands: `CTRS1`, `MTRS2+1`, `ITRS+27`, `CTRS3$`

use std::sync::LazyLock;

use regex::Regex;

use super::{LogHorizon, Outcome};
use crate::dice::{arith, Randomizer};
use crate::tables::TreasureKind;

static TREASURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([CMIOHG])TRS(\d+)?([+\-\d]+)?(\$)?$").unwrap());

pub(crate) fn roll(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    let caps = TREASURE_REGEX.captures(command)?;

    let kind = TreasureKind::from_code(&caps[1])?;
    // digits only, so a failed parse is an overflow
    let cr: i32 = match caps.get(2) {
        Some(m) => m.as_str().parse().unwrap_or(i32::MAX),
        None => 0,
    };
    let modifier = arith::eval_or_zero(caps.get(3).map(|m| m.as_str()));
    if cr == 0 && modifier == 0 {
        return Some(Outcome::plain(format!(
            "{} ＞ CRを指定してください",
            command
        )));
    }
    let prize = caps.get(4).is_some();

    let table = system.catalog().treasure(kind);
    Some(Outcome::plain(table.roll(cr, modifier, prize, randomizer)))
}
