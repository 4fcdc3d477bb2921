//! Roll results

use serde::Serialize;

use crate::dice::Rand;
use crate::locale::CheckLabels;

/// Special outcome of a check roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Judgement {
    Critical,
    Fumble,
    Success,
    Failure,
}

impl Judgement {
    /// Localized label
    pub fn label(self, labels: &CheckLabels) -> &str {
        match self {
            Judgement::Critical => &labels.critical,
            Judgement::Fumble => &labels.fumble,
            Judgement::Success => &labels.success,
            Judgement::Failure => &labels.failure,
        }
    }
}

/// What a handler produces before the dispatcher adds roll bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub text: String,
    pub judgement: Option<Judgement>,
}

impl Outcome {
    pub fn plain(text: String) -> Self {
        Self {
            text,
            judgement: None,
        }
    }

    pub fn judged(text: String, judgement: Option<Judgement>) -> Self {
        Self { text, judgement }
    }
}

/// A handled command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollResult {
    pub text: String,
    /// Rolled with the `S` prefix; only the roller should see it
    pub secret: bool,
    pub success: bool,
    pub failure: bool,
    pub critical: bool,
    pub fumble: bool,
    /// Every die rolled, in order
    pub rands: Vec<Rand>,
}

impl RollResult {
    pub(crate) fn new(outcome: Outcome, secret: bool, rands: Vec<Rand>) -> Self {
        let judgement = outcome.judgement;
        Self {
            text: outcome.text,
            secret,
            success: matches!(judgement, Some(Judgement::Critical | Judgement::Success)),
            failure: matches!(judgement, Some(Judgement::Fumble | Judgement::Failure)),
            critical: judgement == Some(Judgement::Critical),
            fumble: judgement == Some(Judgement::Fumble),
            rands,
        }
    }

    pub fn judgement(&self) -> Option<Judgement> {
        if self.critical {
            Some(Judgement::Critical)
        } else if self.fumble {
            Some(Judgement::Fumble)
        } else if self.success {
            Some(Judgement::Success)
        } else if self.failure {
            Some(Judgement::Failure)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_from_judgement() {
        let critical = RollResult::new(
            Outcome::judged("x".into(), Some(Judgement::Critical)),
            false,
            vec![],
        );
        assert!(critical.critical && critical.success);
        assert!(!critical.failure && !critical.fumble);
        assert_eq!(critical.judgement(), Some(Judgement::Critical));

        let fumble = RollResult::new(
            Outcome::judged("x".into(), Some(Judgement::Fumble)),
            false,
            vec![],
        );
        assert!(fumble.fumble && fumble.failure);
        assert!(!fumble.success);
        assert_eq!(fumble.judgement(), Some(Judgement::Fumble));
    }

    #[test]
    fn test_plain_has_no_flags() {
        let result = RollResult::new(Outcome::plain("t".into()), true, vec![]);
        assert!(result.secret);
        assert_eq!(result.judgement(), None);
        assert!(!result.success && !result.failure);
    }

    #[test]
    fn test_serialize_shape() {
        let result = RollResult::new(
            Outcome::judged("t".into(), Some(Judgement::Success)),
            false,
            vec![Rand { sides: 6, value: 3 }],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["text"], "t");
        assert_eq!(json["success"], true);
        assert_eq!(json["rands"][0]["sides"], 6);
        assert_eq!(json["rands"][0]["value"], 3);
    }
}
