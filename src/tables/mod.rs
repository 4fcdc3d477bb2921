//! Table catalog
//!
//! Every table the game system can roll on, built once from a `Locale` and
//! never modified afterwards. Handlers receive the catalog by reference.

pub mod cash;
mod consumption;
mod d66;
mod eastal;
mod treasure;

use std::collections::BTreeMap;

use tracing::debug;

use crate::locale::{
    CheckLabels, InstrumentData, InventionData, Locale, LocaleError, MultiTableData, NamedList,
};

pub use consumption::{ConsumptionKind, ConsumptionTable};
pub use d66::D66Table;
pub use eastal::EastalTable;
pub use treasure::{BandPolicy, BonusBand, TreasureKind, TreasureTable, PRIZE_DICE_VALUE};

pub(crate) use treasure::dice_suffix;

/// Faces on every die this system rolls
pub const D6: u32 = 6;

/// Names of the D66 tables, in registration order
pub const D66_KEYS: [&str; 7] = ["PTAG", "KOYU", "MGR1", "MGR2", "MGR3", "HLOC", "PCNM"];

/// All tables, validated
#[derive(Debug, Clone)]
pub struct Catalog {
    labels: CheckLabels,
    consumption: BTreeMap<ConsumptionKind, ConsumptionTable>,
    treasure: BTreeMap<TreasureKind, TreasureTable>,
    invention: InventionData,
    akiba_trouble: MultiTableData,
    abandoned_child: MultiTableData,
    instrument: InstrumentData,
    eastal: EastalTable,
    d66: Vec<D66Table>,
}

impl Catalog {
    /// Build and validate every table in `locale`
    pub fn from_locale(locale: Locale) -> Result<Self, LocaleError> {
        let consumption = ConsumptionKind::ALL
            .into_iter()
            .map(|kind| {
                let data = locale
                    .consumption
                    .get(kind.key())
                    .ok_or_else(|| LocaleError::MissingTable(kind.key().to_string()))?;
                Ok::<_, LocaleError>((kind, ConsumptionTable::from_data(kind.key(), data)?))
            })
            .collect::<Result<BTreeMap<_, _>, LocaleError>>()?;

        let treasure = TreasureKind::ALL
            .into_iter()
            .map(|kind| {
                let data = locale
                    .treasure
                    .get(kind.key())
                    .ok_or_else(|| LocaleError::MissingTable(kind.key().to_string()))?;
                Ok::<_, LocaleError>((kind, TreasureTable::from_data(kind, data)?))
            })
            .collect::<Result<BTreeMap<_, _>, LocaleError>>()?;

        let d66 = D66_KEYS
            .into_iter()
            .map(|key| {
                let data = locale
                    .d66
                    .get(key)
                    .ok_or_else(|| LocaleError::MissingTable(key.to_string()))?;
                D66Table::from_data(key, data)
            })
            .collect::<Result<Vec<_>, LocaleError>>()?;

        for (key, list) in [
            ("IAT.merit", &locale.invention.merit),
            ("IAT.demerit", &locale.invention.demerit),
            ("IAT.look", &locale.invention.look),
            ("IAT.kind", &locale.invention.kind),
        ] {
            check_d6_list(key, &list.items)?;
        }
        check_d6_tables("TIAS", &locale.akiba_trouble.tables)?;
        check_d6_tables("ABDC", &locale.abandoned_child.tables)?;
        check_d6_list("MII.type_list", &locale.instrument.type_list)?;
        check_len("MII.items", 6, locale.instrument.items.len())?;
        check_d6_tables("MII.items", &locale.instrument.items)?;

        let eastal = EastalTable::from_data(&locale.eastal)?;

        debug!(
            consumption = consumption.len(),
            treasure = treasure.len(),
            d66 = d66.len(),
            "table catalog built"
        );

        Ok(Self {
            labels: locale.check,
            consumption,
            treasure,
            invention: locale.invention,
            akiba_trouble: locale.akiba_trouble,
            abandoned_child: locale.abandoned_child,
            instrument: locale.instrument,
            eastal,
            d66,
        })
    }

    /// Catalog over the bundled Japanese data
    pub fn bundled() -> Result<Self, LocaleError> {
        Self::from_locale(Locale::bundled()?)
    }

    pub fn labels(&self) -> &CheckLabels {
        &self.labels
    }

    pub fn consumption(&self, kind: ConsumptionKind) -> &ConsumptionTable {
        &self.consumption[&kind]
    }

    pub fn treasure(&self, kind: TreasureKind) -> &TreasureTable {
        &self.treasure[&kind]
    }

    pub fn invention(&self) -> &InventionData {
        &self.invention
    }

    /// Invention sub-table for a selector letter (A/M, B/D, L, T)
    pub fn invention_table(&self, selector: char) -> Option<&NamedList> {
        match selector {
            'A' | 'M' => Some(&self.invention.merit),
            'B' | 'D' => Some(&self.invention.demerit),
            'L' => Some(&self.invention.look),
            'T' => Some(&self.invention.kind),
            _ => None,
        }
    }

    pub fn akiba_trouble(&self) -> &MultiTableData {
        &self.akiba_trouble
    }

    pub fn abandoned_child(&self) -> &MultiTableData {
        &self.abandoned_child
    }

    pub fn instrument(&self) -> &InstrumentData {
        &self.instrument
    }

    pub fn eastal(&self) -> &EastalTable {
        &self.eastal
    }

    /// D66 table registered under `key`
    pub fn d66(&self, key: &str) -> Option<&D66Table> {
        self.d66.iter().find(|t| t.key() == key)
    }

    pub fn d66_tables(&self) -> &[D66Table] {
        &self.d66
    }
}

fn check_len(table: &str, expected: usize, found: usize) -> Result<(), LocaleError> {
    if expected == found {
        Ok(())
    } else {
        Err(LocaleError::WrongSize {
            table: table.to_string(),
            expected,
            found,
        })
    }
}

/// A list indexed by one d6
fn check_d6_list(table: &str, items: &[String]) -> Result<(), LocaleError> {
    check_len(table, D6 as usize, items.len())
}

fn check_d6_tables(table: &str, tables: &[Vec<String>]) -> Result<(), LocaleError> {
    if tables.is_empty() {
        return Err(LocaleError::MissingTable(table.to_string()));
    }
    tables
        .iter()
        .try_for_each(|items| check_d6_list(table, items))
}
