//! Log Horizon TRPG game system
//!
//! Takes one command, offers it to each handler in a fixed order and returns
//! the first result. A handler that does not recognize the command returns
//! `None` and the next one gets a turn:
//!
//! 1. check roll (`3LH>=8`)
//! 2. consumption tables (`PCT1+1`)
//! 3. treasure tables (`CTRS1$`)
//! 4. invention attributes (`IAT`)
//! 5. Akiba trouble (`TIAS`)
//! 6. abandoned child (`ABDC`)
//! 7. musical instrument (`MII`)
//! 8. Eastal exploration (`ESTL`)
//! 9. D66 tables (`PTAG`, `KOYU`, `MGR1`-`MGR3`, `HLOC`, `PCNM`)
//!
//! Commands that do not start with a registered prefix never reach a handler.

mod check;
mod consumption;
mod eastal;
mod random_tables;
mod result;
mod treasure;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::dice::{DiceRecorder, Randomizer};
use crate::tables::{Catalog, D66_KEYS};

pub use check::{judge, RollSpec};
pub use result::{Judgement, RollResult};

pub(crate) use result::Outcome;

/// Game system identifier
pub const ID: &str = "LogHorizon";

/// Game system name
pub const NAME: &str = "ログ・ホライズンTRPG";

/// Reading of the name, for sorting
pub const SORT_KEY: &str = "ろくほらいすんTRPG";

/// Default cap on dice in one check roll
pub const DEFAULT_MAX_DICE: u32 = 100;

/// Command prefixes claimed by the handlers (regex fragments)
pub const PREFIXES: &[&str] = &[
    r"\d+LH", "PC", "EC", "GC", "CC", "CTR", "MTR", "ITR", "OTR", "HTR", "GTR", "IAT", "TIAS",
    "ABDC", "MII", "ESCT", "CSCT", "ESTL",
];

pub const HELP_MESSAGE: &str = "\
・判定(xLH±y>=z)
　xD6の判定。クリティカル、ファンブルを自動判定します。
　x：振るダイス数。
　±y：修正値。省略可能。
　>=z：目標値。省略可能。
　例） 3LH　2LH>=8　3LH+1>=10
・消耗表(tCTx±y$z)
　PCT 体力／ECT 気力／GCT 物品／CCT 金銭
　x：CR。
　±y：修正値。省略可能。
　$z：ダイス目を z に固定。省略可能。
　例） PCT1　ECT2+1　GCT3-1　CCT3$5
・財宝表(tTRSx±y$)
　CTRS 金銭／MTRS 魔法素材／ITRS 換金アイテム／OTRS そのほか／HTRS ヒロイン／GTRS ゴブリン財宝表
　x：CR。省略時は修正値の番号を直接参照。
　±y：修正値。省略可能。
　$：ダイス目を7に固定（プライズ1回分）。省略可能。
　例） CTRS1　MTRS2+1　ITRS3-1　ITRS+27　CTRS3$
・パーソナリティタグ表(PTAG)
・交友表(KOYU)
・イースタル探索表(ESTLx±y$z)
　x：CR。省略時はダイスを振らず修正値の番号を参照。
　±y：修正値。省略可能。
　$z：ダイス目を z に固定。省略可能。
　例） ESTL1　ESTL+15　ESTL2+1$5　ESTL2-1$5
・プレフィックスドマジックアイテム効果表(MGRx) xはMG
・楽器種別表(MIIx) xは楽器の種類(1～6)、省略可能
　1 打楽器１／2 鍵盤楽器／3 弦楽器１／4 弦楽器２／5 管楽器１／6 管楽器２
・特殊消耗表(tSCTx±y$z) 消耗表と同様、CRは省略可能
　ESCT ロデ研は爆発だ！／CSCT アルヴの呪いじゃ！
・攻撃命中箇所ランダム決定表(HLOC)
・PC名ランダム決定表(PCNM)
・ロデ研の新発明ランダム決定表(IATt)
　IATA 特徴A(メリット)／IATB 特徴B(デメリット)／IATL 見た目／IATT 種類
　tを省略すると全て表示。A/B/L/Tを任意の順で連結可能
　例） IAT　IATALT　IATABBLT　IATABL
・アキバの街で遭遇するトラブルランダム決定表(TIAS)
・廃棄児ランダム決定表(ABDC)
・コマンドの前に S を付けるとシークレットダイス
";

fn prefix_alternation() -> String {
    let tables = D66_KEYS.iter().map(|key| regex::escape(key));
    PREFIXES
        .iter()
        .map(|p| p.to_string())
        .chain(tables)
        .collect::<Vec<_>>()
        .join("|")
}

/// Matches the start of any command some handler may accept
static PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^(?:{})", prefix_alternation())).unwrap());

/// Pattern a host can use to route raw chat text here
static COMMAND_PATTERN: LazyLock<String> =
    LazyLock::new(|| format!("^(?i)S?(?:{})", prefix_alternation()));

/// `+n`, `-n`, or nothing for zero
pub(crate) fn format_modifier(modifier: i32) -> String {
    if modifier == 0 {
        String::new()
    } else {
        format!("{:+}", modifier)
    }
}

type Handler = fn(&LogHorizon, &str, &mut dyn Randomizer) -> Option<Outcome>;

/// Handlers in precedence order
const HANDLERS: &[(&str, Handler)] = &[
    ("check", check::roll),
    ("consumption", consumption::roll),
    ("treasure", treasure::roll),
    ("invention", random_tables::invention),
    ("akiba_trouble", random_tables::akiba_trouble),
    ("abandoned_child", random_tables::abandoned_child),
    ("instrument", random_tables::instrument),
    ("eastal", eastal::roll),
    ("d66", roll_d66),
];

fn roll_d66(
    system: &LogHorizon,
    command: &str,
    randomizer: &mut dyn Randomizer,
) -> Option<Outcome> {
    let table = system.catalog().d66(command)?;
    Some(Outcome::plain(table.roll(randomizer)))
}

/// Trim, drop anything after the first whitespace and upper-case
pub fn normalize_command(input: &str) -> Option<String> {
    input
        .split_whitespace()
        .next()
        .map(|command| command.to_ascii_uppercase())
}

/// Static description of the game system
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub sort_key: &'static str,
    pub command_pattern: String,
    pub help_message: &'static str,
}

/// The Log Horizon game system
#[derive(Debug, Clone)]
pub struct LogHorizon {
    catalog: Catalog,
    max_dice: u32,
}

impl LogHorizon {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            max_dice: DEFAULT_MAX_DICE,
        }
    }

    /// Cap the dice count of check rolls; larger counts are not handled
    pub fn with_max_dice(mut self, max_dice: u32) -> Self {
        self.max_dice = max_dice;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn max_dice(&self) -> u32 {
        self.max_dice
    }

    /// Case-insensitive regex matching every command this system claims
    pub fn command_pattern() -> &'static str {
        &COMMAND_PATTERN
    }

    pub fn info(&self) -> SystemInfo {
        SystemInfo {
            id: ID,
            name: NAME,
            sort_key: SORT_KEY,
            command_pattern: Self::command_pattern().to_string(),
            help_message: HELP_MESSAGE,
        }
    }

    /// Whether a normalized command starts with a registered prefix
    pub fn claims(command: &str) -> bool {
        PREFIX_REGEX.is_match(command)
    }

    /// Evaluate a command. `None` means the command is not one of ours.
    pub fn eval(&self, input: &str, randomizer: &mut dyn Randomizer) -> Option<RollResult> {
        let normalized = normalize_command(input)?;

        let (command, secret) = if Self::claims(&normalized) {
            (normalized.as_str(), false)
        } else {
            match normalized.strip_prefix('S') {
                Some(rest) if Self::claims(rest) => (rest, true),
                _ => {
                    debug!(command = %normalized, "no registered prefix");
                    return None;
                }
            }
        };

        let mut recorder = DiceRecorder::new(randomizer);
        for (name, handler) in HANDLERS {
            if let Some(outcome) = handler(self, command, &mut recorder) {
                debug!(handler = *name, command, secret, "command handled");
                return Some(RollResult::new(outcome, secret, recorder.into_rands()));
            }
        }

        debug!(command, "prefix matched but no handler accepted");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRandomizer;

    fn system() -> LogHorizon {
        LogHorizon::new(Catalog::bundled().unwrap())
    }

    #[test]
    fn test_format_modifier() {
        assert_eq!(format_modifier(0), "");
        assert_eq!(format_modifier(3), "+3");
        assert_eq!(format_modifier(-2), "-2");
    }

    #[test]
    fn test_normalize_command() {
        assert_eq!(normalize_command("  3lh>=8 攻撃"), Some("3LH>=8".to_string()));
        assert_eq!(normalize_command("pct1"), Some("PCT1".to_string()));
        assert_eq!(normalize_command("   "), None);
    }

    #[test]
    fn test_claims() {
        assert!(LogHorizon::claims("3LH"));
        assert!(LogHorizon::claims("PCT1"));
        assert!(LogHorizon::claims("CTRS"));
        assert!(LogHorizon::claims("PTAG"));
        assert!(LogHorizon::claims("MGR2"));
        assert!(!LogHorizon::claims("2D6"));
        assert!(!LogHorizon::claims("LH"));
        assert!(!LogHorizon::claims("XPCT1"));
    }

    #[test]
    fn test_command_pattern_shape() {
        let pattern = LogHorizon::command_pattern();
        assert!(pattern.starts_with("^(?i)S?(?:"));
        assert!(pattern.contains("ESTL"));
        assert!(pattern.contains("PCNM"));
        assert!(Regex::new(pattern).unwrap().is_match("s3lh"));
    }

    #[test]
    fn test_handler_order() {
        let names: Vec<&str> = HANDLERS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "check",
                "consumption",
                "treasure",
                "invention",
                "akiba_trouble",
                "abandoned_child",
                "instrument",
                "eastal",
                "d66"
            ]
        );
    }

    #[test]
    fn test_secret_prefix() {
        let system = system();
        let mut dice = ScriptedRandomizer::new([3, 4]);
        let result = system.eval("S2LH", &mut dice).unwrap();
        assert!(result.secret);
        assert_eq!(result.text, "(2LH) ＞ 7[3,4] ＞ 7");
    }

    #[test]
    fn test_unknown_commands() {
        let system = system();
        let mut dice = ScriptedRandomizer::new([]);
        assert_eq!(system.eval("2D6", &mut dice), None);
        assert_eq!(system.eval("", &mut dice), None);
        assert_eq!(system.eval("SS3LH", &mut dice), None);
        // Claimed prefix, but no grammar matches
        assert_eq!(system.eval("PC", &mut dice), None);
        assert_eq!(system.eval("ESTL", &mut dice), None);
        assert_eq!(system.eval("MII7", &mut dice), None);
    }

    #[test]
    fn test_max_dice() {
        let system = system().with_max_dice(3);
        let mut dice = ScriptedRandomizer::new([]);
        assert!(system.eval("3LH", &mut dice).is_some());
        assert_eq!(system.eval("4LH", &mut dice), None);
        assert_eq!(system.eval("0LH", &mut dice), None);
    }

    #[test]
    fn test_rands_recorded() {
        let system = system();
        let mut dice = ScriptedRandomizer::new([2, 5]);
        let result = system.eval("PTAG", &mut dice).unwrap();
        assert_eq!(result.rands.len(), 2);
        assert_eq!(result.rands[0].value, 2);
        assert_eq!(result.rands[1].value, 5);
        assert!(result.text.contains("(25)"));
    }

    #[test]
    fn test_info() {
        let info = system().info();
        assert_eq!(info.id, "LogHorizon");
        assert_eq!(info.name, "ログ・ホライズンTRPG");
        assert!(info.help_message.contains("3LH"));
    }
}
