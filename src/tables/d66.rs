//! D66 tables
//!
//! Two d6 read as a two-digit number (11..66) rather than summed.

use crate::dice::Randomizer;
use crate::locale::{D66Data, D66Sort, LocaleError};

/// Entries in a D66 table
pub const D66_SIZE: usize = 36;

#[derive(Debug, Clone)]
pub struct D66Table {
    key: String,
    name: String,
    sort: D66Sort,
    items: Vec<String>,
}

impl D66Table {
    pub fn from_data(key: &str, data: &D66Data) -> Result<Self, LocaleError> {
        if data.items.len() != D66_SIZE {
            return Err(LocaleError::WrongSize {
                table: key.to_string(),
                expected: D66_SIZE,
                found: data.items.len(),
            });
        }

        Ok(Self {
            key: key.to_string(),
            name: data.name.clone(),
            sort: data.sort,
            items: data.items.clone(),
        })
    }

    /// Command name this table answers to
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry for a pair of dice already in reading order
    pub fn item(&self, tens: u32, ones: u32) -> Option<&str> {
        if !(1..=6).contains(&tens) || !(1..=6).contains(&ones) {
            return None;
        }
        let index = ((tens - 1) * 6 + (ones - 1)) as usize;
        self.items.get(index).map(String::as_str)
    }

    pub fn roll(&self, randomizer: &mut dyn Randomizer) -> String {
        let mut dice = randomizer.roll_many(2, 6);
        match self.sort {
            D66Sort::NoSort => {}
            D66Sort::Ascending => dice.sort_unstable(),
            D66Sort::Descending => dice.sort_unstable_by(|a, b| b.cmp(a)),
        }
        let (tens, ones) = (dice[0], dice[1]);

        format!(
            "{}({}{}) ＞ {}",
            self.name,
            tens,
            ones,
            self.item(tens, ones).unwrap_or_default()
        )
    }
}
