//! Fixed multi-roll tables
//!
//! - `IAT[ABLT...]` invention attributes from the Rode lab
//! - `TIAS` trouble on the streets of Akiba
//! - `ABDC` abandoned child
//! - `MII[type]` musical instrument

use std::sync::LazyLock;

use regex::Regex;

use super::{LogHorizon, Outcome};
use crate::dice::Randomizer;
use crate::tables::D6;

static INVENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^IAT([ABMDLT]*)$").unwrap());

static INSTRUMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^MII(\d?)$").unwrap());

/// Sub-tables rolled when `IAT` names none
const DEFAULT_INVENTION_TABLES: &str = "MDLT";

/// Entry for a d6 result; out-of-range dice read as empty
fn pick_d6(items: &[String], die: u32) -> &str {
    (die as usize)
        .checked_sub(1)
        .and_then(|i| items.get(i))
        .map(String::as_str)
        .unwrap_or_default()
}

fn join_dice(dice: &[u32]) -> String {
    let numbers: Vec<String> = dice.iter().map(u32::to_string).collect();
    numbers.join(",")
}

pub(crate) fn invention(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    let caps = INVENTION_REGEX.captures(command)?;
    let selectors = match &caps[1] {
        "" => DEFAULT_INVENTION_TABLES,
        requested => requested,
    };
    let single = selectors.len() == 1;
    let catalog = system.catalog();

    let mut dice = Vec::with_capacity(selectors.len());
    let mut results = Vec::with_capacity(selectors.len());
    for selector in selectors.chars() {
        let table = catalog.invention_table(selector)?;
        let die = randomizer.roll_once(D6);
        let chosen = pick_d6(&table.items, die);

        dice.push(die);
        results.push(if single {
            format!("{}：{}", table.name, chosen)
        } else {
            chosen.to_string()
        });
    }

    Some(Outcome::plain(format!(
        "{}([{}])：{}",
        catalog.invention().name,
        join_dice(&dice),
        results.join(" ")
    )))
}

/// Roll once on every sub-table and join the results with `separator`
fn roll_each(
    name: &str,
    tables: &[Vec<String>],
    separator: &str,
    randomizer: &mut dyn Randomizer,
) -> String {
    let mut dice = Vec::with_capacity(tables.len());
    let mut results = Vec::with_capacity(tables.len());
    for table in tables {
        let die = randomizer.roll_once(D6);
        dice.push(die);
        results.push(pick_d6(table, die));
    }

    format!("{}([{}])：{}", name, join_dice(&dice), results.join(separator))
}

pub(crate) fn akiba_trouble(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    if command != "TIAS" {
        return None;
    }
    let data = system.catalog().akiba_trouble();
    Some(Outcome::plain(roll_each(
        &data.name,
        &data.tables,
        " ",
        randomizer,
    )))
}

pub(crate) fn abandoned_child(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    if command != "ABDC" {
        return None;
    }
    let data = system.catalog().abandoned_child();
    Some(Outcome::plain(roll_each(
        &data.name,
        &data.tables,
        "\u{3000}",
        randomizer,
    )))
}

pub(crate) fn instrument(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    let caps = INSTRUMENT_REGEX.captures(command)?;
    let rolled = caps[1].is_empty();
    let kind = if rolled {
        randomizer.roll_once(D6)
    } else {
        caps[1].parse().ok()?
    };
    if !(1..=D6).contains(&kind) {
        return None;
    }

    let data = system.catalog().instrument();
    let index = (kind - 1) as usize;
    let type_name = &data.type_list[index];
    let die = randomizer.roll_once(D6);
    let item = pick_d6(&data.items[index], die);

    let shown_kind = if rolled {
        format!("({})", kind)
    } else {
        String::new()
    };
    Some(Outcome::plain(format!(
        "{}{}：{}({})：{}",
        data.name, shown_kind, type_name, die, item
    )))
}
