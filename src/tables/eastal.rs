//! Eastal exploration table

use std::collections::BTreeMap;

use crate::locale::{IndexedData, LocaleError};

pub const MIN_INDEX: i32 = 7;
pub const MAX_INDEX: i32 = 162;

#[derive(Debug, Clone)]
pub struct EastalTable {
    name: String,
    items: BTreeMap<i32, String>,
}

impl EastalTable {
    pub fn from_data(data: &IndexedData) -> Result<Self, LocaleError> {
        if let Some(index) = (MIN_INDEX..=MAX_INDEX).find(|i| !data.items.contains_key(i)) {
            return Err(LocaleError::MissingEntry {
                table: "ESTL".to_string(),
                index,
            });
        }

        Ok(Self {
            name: data.name.clone(),
            items: data.items.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clamp a raw total into the table
    pub fn clamp(total: i32) -> i32 {
        total.clamp(MIN_INDEX, MAX_INDEX)
    }

    /// Entry for a clamped total, without its trailing newline
    pub fn item(&self, total: i32) -> &str {
        let text = self
            .items
            .get(&Self::clamp(total))
            .map(String::as_str)
            .unwrap_or_default();
        chomp(text)
    }
}

/// Drop one trailing line break
fn chomp(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text)
}
