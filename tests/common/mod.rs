//! Common test utilities - scripted rolls against the bundled tables

#![allow(dead_code)]

use lhdice::dice::ScriptedRandomizer;
use lhdice::{Catalog, LogHorizon, RollResult};

/// Game system on the bundled Japanese tables
pub fn system() -> LogHorizon {
    LogHorizon::new(Catalog::bundled().expect("bundled locale should load"))
}

/// Evaluate `command` with the dice values given, in order
pub fn roll(command: &str, dice: &[u32]) -> Option<RollResult> {
    let mut randomizer = ScriptedRandomizer::new(dice.iter().copied());
    system().eval(command, &mut randomizer)
}

/// Text of a command that must be recognized
pub fn text(command: &str, dice: &[u32]) -> String {
    roll(command, dice)
        .unwrap_or_else(|| panic!("{} should be handled", command))
        .text
}
