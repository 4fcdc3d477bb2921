//! Localized table data
//!
//! Every text a roll can produce lives in a JSON document rather than in code.
//! The Japanese data ships inside the binary; another file can be loaded at
//! startup through the `locale_path` config key.
//!
//! The document is deserialized into plain structs here. Shape checks (band
//! sizes, index coverage) happen when the `Catalog` is built from it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Bundled Japanese table data
pub const JA_JP: &str = include_str!("../../locales/ja_jp.json");

/// Errors while loading or validating locale data
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read locale file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid locale data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing table {0}")]
    MissingTable(String),

    #[error("table {table}: expected {expected} entries, found {found}")]
    WrongSize {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("table {table}: no entry for index {index}")]
    MissingEntry { table: String, index: i32 },
}

/// Root of a locale document
#[derive(Debug, Clone, Deserialize)]
pub struct Locale {
    pub check: CheckLabels,
    /// Keyed by command name: PCT, ECT, GCT, CCT, ESCT, CSCT
    pub consumption: BTreeMap<String, ConsumptionData>,
    /// Keyed by command name: CTRS, MTRS, ITRS, OTRS, HTRS, GTRS
    pub treasure: BTreeMap<String, TreasureData>,
    pub invention: InventionData,
    pub akiba_trouble: MultiTableData,
    pub abandoned_child: MultiTableData,
    pub instrument: InstrumentData,
    pub eastal: IndexedData,
    /// Keyed by command name: PTAG, KOYU, MGR1..3, HLOC, PCNM
    pub d66: BTreeMap<String, D66Data>,
}

/// Judgement labels for check rolls
#[derive(Debug, Clone, Deserialize)]
pub struct CheckLabels {
    pub critical: String,
    pub fumble: String,
    pub success: String,
    pub failure: String,
}

/// A consumption table: one list of eight results per CR band
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumptionData {
    pub name: String,
    pub bands: Vec<Vec<String>>,
}

/// A treasure table. The cash table carries only its name.
#[derive(Debug, Clone, Deserialize)]
pub struct TreasureData {
    pub name: String,
    #[serde(default)]
    pub items: BTreeMap<i32, String>,
}

/// A named list of six results
#[derive(Debug, Clone, Deserialize)]
pub struct NamedList {
    pub name: String,
    pub items: Vec<String>,
}

/// Invention attribute sub-tables
#[derive(Debug, Clone, Deserialize)]
pub struct InventionData {
    pub name: String,
    /// Feature A (merit)
    pub merit: NamedList,
    /// Feature B (demerit)
    pub demerit: NamedList,
    pub look: NamedList,
    pub kind: NamedList,
}

/// Several d6 sub-tables rolled together
#[derive(Debug, Clone, Deserialize)]
pub struct MultiTableData {
    pub name: String,
    pub tables: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentData {
    pub name: String,
    pub type_list: Vec<String>,
    /// One list of six instruments per type
    pub items: Vec<Vec<String>>,
}

/// A table keyed directly by a computed index
#[derive(Debug, Clone, Deserialize)]
pub struct IndexedData {
    pub name: String,
    pub items: BTreeMap<i32, String>,
}

/// How the two dice of a D66 roll are ordered before reading them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum D66Sort {
    #[default]
    #[serde(rename = "none")]
    NoSort,
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Debug, Clone, Deserialize)]
pub struct D66Data {
    pub name: String,
    #[serde(default)]
    pub sort: D66Sort,
    /// 36 entries in order 11, 12, ... 16, 21, ... 66
    pub items: Vec<String>,
}

impl Locale {
    /// Parse a locale document
    pub fn from_json(text: &str) -> Result<Self, LocaleError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The Japanese data compiled into the crate
    pub fn bundled() -> Result<Self, LocaleError> {
        Self::from_json(JA_JP)
    }

    /// Read a locale document from disk
    pub fn from_path(path: &Path) -> Result<Self, LocaleError> {
        debug!(path = %path.display(), "loading locale file");
        let text = std::fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load from `path` when given, otherwise use the bundled data
    pub fn load(path: Option<&Path>) -> Result<Self, LocaleError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_parses() {
        let locale = Locale::bundled().unwrap();
        assert_eq!(locale.check.critical, "クリティカル");
        assert_eq!(locale.check.fumble, "ファンブル");
        assert_eq!(locale.consumption.len(), 6);
        assert_eq!(locale.treasure.len(), 6);
        assert_eq!(locale.d66.len(), 7);
    }

    #[test]
    fn test_integer_keys() {
        let locale = Locale::bundled().unwrap();
        let eastal = &locale.eastal.items;
        assert_eq!(eastal.keys().next(), Some(&7));
        assert_eq!(eastal.keys().last(), Some(&162));
    }

    #[test]
    fn test_d66_sort_default() {
        let data: D66Data =
            serde_json::from_str(r#"{"name": "T", "items": ["a"]}"#).unwrap();
        assert_eq!(data.sort, D66Sort::NoSort);

        let data: D66Data =
            serde_json::from_str(r#"{"name": "T", "sort": "desc", "items": []}"#).unwrap();
        assert_eq!(data.sort, D66Sort::Descending);
    }

    #[test]
    fn test_missing_file() {
        let err = Locale::from_path(Path::new("/nonexistent/ja_jp.json")).unwrap_err();
        assert!(matches!(err, LocaleError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ja_jp.json"));
    }

    #[test]
    fn test_bad_json() {
        let err = Locale::from_json("{").unwrap_err();
        assert!(matches!(err, LocaleError::Json(_)));
    }
}
