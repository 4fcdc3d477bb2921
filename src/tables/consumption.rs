//! Consumption tables
//!
//! Each table has one row of eight results per CR band (CR 1-5, 6-10, ...).
//! A d6 plus modifier picks the result, clamped into the row.

use crate::dice::Randomizer;
use crate::locale::{ConsumptionData, LocaleError};

/// Results per band, indexed 0..=7
pub const BAND_WIDTH: usize = 8;

/// CR values covered by one band
const CR_PER_BAND: i32 = 5;

/// The six consumption tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsumptionKind {
    /// PCT
    Physical,
    /// ECT
    Mental,
    /// GCT
    Goods,
    /// CCT
    Cash,
    /// ESCT
    Explosion,
    /// CSCT
    Curse,
}

impl ConsumptionKind {
    pub const ALL: [ConsumptionKind; 6] = [
        ConsumptionKind::Physical,
        ConsumptionKind::Mental,
        ConsumptionKind::Goods,
        ConsumptionKind::Cash,
        ConsumptionKind::Explosion,
        ConsumptionKind::Curse,
    ];

    /// Look up by the letters in front of `CT`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(Self::Physical),
            "E" => Some(Self::Mental),
            "G" => Some(Self::Goods),
            "C" => Some(Self::Cash),
            "ES" => Some(Self::Explosion),
            "CS" => Some(Self::Curse),
            _ => None,
        }
    }

    /// Command name, also the locale key
    pub fn key(self) -> &'static str {
        match self {
            Self::Physical => "PCT",
            Self::Mental => "ECT",
            Self::Goods => "GCT",
            Self::Cash => "CCT",
            Self::Explosion => "ESCT",
            Self::Curse => "CSCT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsumptionTable {
    name: String,
    bands: Vec<[String; BAND_WIDTH]>,
}

impl ConsumptionTable {
    /// Build from locale data, checking every band has eight results
    pub fn from_data(key: &str, data: &ConsumptionData) -> Result<Self, LocaleError> {
        if data.bands.is_empty() {
            return Err(LocaleError::WrongSize {
                table: key.to_string(),
                expected: 1,
                found: 0,
            });
        }

        let bands = data
            .bands
            .iter()
            .map(|band| {
                <[String; BAND_WIDTH]>::try_from(band.clone()).map_err(|v| {
                    LocaleError::WrongSize {
                        table: key.to_string(),
                        expected: BAND_WIDTH,
                        found: v.len(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: data.name.clone(),
            bands,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Band for a character rank: floor((cr - 1) / 5), clamped to the table
    pub fn band_index(&self, cr: i32) -> usize {
        let last = self.bands.len().saturating_sub(1) as i32;
        (cr - 1).div_euclid(CR_PER_BAND).clamp(0, last) as usize
    }

    /// Result text for a band and an unclamped total
    pub fn item(&self, band: usize, total: i32) -> &str {
        &self.bands[band][total.clamp(0, BAND_WIDTH as i32 - 1) as usize]
    }

    /// Roll on the table. `fixed` replaces the d6 when given.
    pub fn roll(
        &self,
        cr: i32,
        modifier: i32,
        fixed: Option<i32>,
        randomizer: &mut dyn Randomizer,
    ) -> String {
        let band = self.band_index(cr);
        let die = fixed.unwrap_or_else(|| randomizer.roll_once(6) as i32);
        let total = die.saturating_add(modifier);

        format!("{}({}[{}])：{}", self.name, total, die, self.item(band, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRandomizer;

    fn table(bands: usize) -> ConsumptionTable {
        let data = ConsumptionData {
            name: "体力消耗表".to_string(),
            bands: (0..bands)
                .map(|b| (0..8).map(|i| format!("B{}-{}", b, i)).collect())
                .collect(),
        };
        ConsumptionTable::from_data("PCT", &data).unwrap()
    }

    #[test]
    fn test_kind_codes() {
        for kind in ConsumptionKind::ALL {
            let code = kind.key().strip_suffix("CT").unwrap();
            assert_eq!(ConsumptionKind::from_code(code), Some(kind));
        }
        assert_eq!(ConsumptionKind::from_code("X"), None);
    }

    #[test]
    fn test_band_index() {
        let t = table(4);
        assert_eq!(t.band_index(0), 0);
        assert_eq!(t.band_index(1), 0);
        assert_eq!(t.band_index(5), 0);
        assert_eq!(t.band_index(6), 1);
        assert_eq!(t.band_index(10), 1);
        assert_eq!(t.band_index(11), 2);
        assert_eq!(t.band_index(16), 3);
        assert_eq!(t.band_index(99), 3);
    }

    #[test]
    fn test_single_band_ignores_cr() {
        let t = table(1);
        assert_eq!(t.band_index(0), 0);
        assert_eq!(t.band_index(30), 0);
    }

    #[test]
    fn test_total_clamped_into_row() {
        let t = table(2);
        assert_eq!(t.item(0, -3), "B0-0");
        assert_eq!(t.item(0, 7), "B0-7");
        assert_eq!(t.item(1, 12), "B1-7");
    }

    #[test]
    fn test_roll_format() {
        let t = table(2);
        let mut dice = ScriptedRandomizer::new([4]);
        assert_eq!(t.roll(6, 1, None, &mut dice), "体力消耗表(5[4])：B1-5");
    }

    #[test]
    fn test_fixed_die_skips_randomizer() {
        let t = table(2);
        let mut dice = ScriptedRandomizer::new([1]);
        assert_eq!(t.roll(1, 0, Some(9), &mut dice), "体力消耗表(9[9])：B0-7");
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_short_band_rejected() {
        let data = ConsumptionData {
            name: "x".to_string(),
            bands: vec![vec!["a".to_string(); 7]],
        };
        let err = ConsumptionTable::from_data("ECT", &data).unwrap_err();
        assert!(matches!(
            err,
            LocaleError::WrongSize { expected: 8, found: 7, .. }
        ));
    }
}
