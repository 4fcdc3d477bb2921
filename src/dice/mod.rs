//! Dice primitives
//!
//! Implements the pieces every table handler leans on:
//! - A `Randomizer` seam so rolls can be scripted in tests
//! - A recording wrapper that reports every die consumed
//! - A small arithmetic evaluator for "+1-2" style modifiers
//! - A lockable dice source for the server

pub mod arith;
mod randomizer;
mod source;

pub use arith::{eval, eval_or_zero, ArithError};
pub use randomizer::{DiceRecorder, Rand, Randomizer, RngRandomizer, ScriptedRandomizer};
pub use source::DiceSource;
