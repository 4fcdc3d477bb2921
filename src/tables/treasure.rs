//! Treasure tables
//!
//! Six tables share one lookup contract. They differ only in which indices
//! read a row directly and which higher indices reuse a lower row with an
//! extra gold bonus. That difference is captured in a `BandPolicy`.

use std::collections::BTreeMap;

use crate::dice::Randomizer;
use crate::locale::{LocaleError, TreasureData};

use super::cash;

/// Lowest index with an entry
pub const FIRST_INDEX: i32 = 7;

/// Die value used for a single prize draw (`$`)
pub const PRIZE_DICE_VALUE: u32 = 7;

/// A high-index band that reuses a lower row and adds gold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusBand {
    /// Last index in the band
    pub upto: i32,
    /// Subtracted from the index to find the reused row
    pub offset: i32,
    pub bonus: &'static str,
}

/// Index-to-row mapping for one family of tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandPolicy {
    /// Last index read directly
    pub plain_max: i32,
    pub bonus_bands: &'static [BonusBand],
}

impl BandPolicy {
    /// Cash, magic material, item and other tables
    pub const EXPANSION: BandPolicy = BandPolicy {
        plain_max: 162,
        bonus_bands: &[
            BonusBand { upto: 172, offset: 10, bonus: "200G" },
            BonusBand { upto: 182, offset: 20, bonus: "400G" },
            BonusBand { upto: 187, offset: 30, bonus: "600G" },
        ],
    };

    /// Goblin treasure
    pub const STANDARD: BandPolicy = BandPolicy {
        plain_max: 62,
        bonus_bands: &[
            BonusBand { upto: 72, offset: 10, bonus: "80G" },
            BonusBand { upto: 82, offset: 20, bonus: "160G" },
            BonusBand { upto: 87, offset: 30, bonus: "260G" },
        ],
    };

    /// Heroine treasure
    pub const HEROINE: BandPolicy = BandPolicy {
        plain_max: 53,
        bonus_bands: &[],
    };

    /// Highest index with any result
    pub fn last_index(&self) -> i32 {
        self.bonus_bands
            .last()
            .map_or(self.plain_max, |band| band.upto)
    }

    /// Resolve an index against `items`
    pub fn pick(&self, index: i32, items: &BTreeMap<i32, String>) -> String {
        let row = |i: i32| items.get(&i).map(String::as_str).unwrap_or_default();

        if index < FIRST_INDEX {
            return format!("{}以下の出目は未定義です", FIRST_INDEX - 1);
        }
        if index <= self.plain_max {
            return row(index).to_string();
        }
        match self.bonus_bands.iter().find(|band| index <= band.upto) {
            Some(band) => format!("{}&{}", row(index - band.offset), band.bonus),
            None => format!("{}以降の出目は未定義です", self.last_index()),
        }
    }
}

/// The six treasure tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TreasureKind {
    /// CTRS
    Cash,
    /// MTRS
    MagicMaterial,
    /// ITRS
    Item,
    /// OTRS
    Other,
    /// HTRS
    Heroine,
    /// GTRS
    Goblin,
}

impl TreasureKind {
    pub const ALL: [TreasureKind; 6] = [
        TreasureKind::Cash,
        TreasureKind::MagicMaterial,
        TreasureKind::Item,
        TreasureKind::Other,
        TreasureKind::Heroine,
        TreasureKind::Goblin,
    ];

    /// Look up by the letter in front of `TRS`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Self::Cash),
            "M" => Some(Self::MagicMaterial),
            "I" => Some(Self::Item),
            "O" => Some(Self::Other),
            "H" => Some(Self::Heroine),
            "G" => Some(Self::Goblin),
            _ => None,
        }
    }

    /// Command name, also the locale key
    pub fn key(self) -> &'static str {
        match self {
            Self::Cash => "CTRS",
            Self::MagicMaterial => "MTRS",
            Self::Item => "ITRS",
            Self::Other => "OTRS",
            Self::Heroine => "HTRS",
            Self::Goblin => "GTRS",
        }
    }

    pub fn policy(self) -> BandPolicy {
        match self {
            Self::Cash | Self::MagicMaterial | Self::Item | Self::Other => BandPolicy::EXPANSION,
            Self::Heroine => BandPolicy::HEROINE,
            Self::Goblin => BandPolicy::STANDARD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreasureTable {
    name: String,
    items: BTreeMap<i32, String>,
    policy: BandPolicy,
}

impl TreasureTable {
    /// Build a table, checking every directly-read index has an entry.
    ///
    /// The cash table takes its rows from the built-in price list and only
    /// its name from `data`.
    pub fn from_data(kind: TreasureKind, data: &TreasureData) -> Result<Self, LocaleError> {
        let items: BTreeMap<i32, String> = match kind {
            TreasureKind::Cash => cash::entries().map(|(i, p)| (i, p.to_string())).collect(),
            _ => data.items.clone(),
        };
        let policy = kind.policy();

        if let Some(index) = (FIRST_INDEX..=policy.plain_max).find(|i| !items.contains_key(i)) {
            return Err(LocaleError::MissingEntry {
                table: kind.key().to_string(),
                index,
            });
        }

        Ok(Self {
            name: data.name.clone(),
            items,
            policy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest index with any result
    pub fn last_index(&self) -> i32 {
        self.policy.last_index()
    }

    /// Result text for an index
    pub fn pick(&self, index: i32) -> String {
        self.policy.pick(index, &self.items)
    }

    /// Roll on the table.
    ///
    /// With no CR and a non-zero modifier the modifier is the index itself;
    /// no dice are rolled, though a prize draw still shows its 7. Otherwise
    /// 2d6 (or the single prize value 7 when `prize` is set) plus 5 per CR
    /// plus the modifier.
    pub fn roll(
        &self,
        cr: i32,
        modifier: i32,
        prize: bool,
        randomizer: &mut dyn Randomizer,
    ) -> String {
        let prize_dice = || {
            if prize {
                vec![PRIZE_DICE_VALUE]
            } else {
                Vec::new()
            }
        };
        let (index, dice) = if cr == 0 && modifier != 0 {
            (modifier, prize_dice())
        } else {
            let dice = if prize {
                prize_dice()
            } else {
                randomizer.roll_many(2, 6)
            };
            let sum: u32 = dice.iter().sum();
            let index = (sum as i32)
                .saturating_add(cr.saturating_mul(5))
                .saturating_add(modifier);
            (index, dice)
        };

        format!(
            "{}({}{})：{}",
            self.name,
            index,
            dice_suffix(&dice),
            self.pick(index)
        )
    }
}

/// `[a,b]`, or nothing when no dice were used
pub(crate) fn dice_suffix(dice: &[u32]) -> String {
    if dice.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = dice.iter().map(u32::to_string).collect();
    format!("[{}]", joined.join(","))
}
