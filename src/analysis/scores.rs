//! Score extraction from the model's profile reply.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Score labels the model is instructed to emit, in spreadsheet column order.
pub const SCORE_LABELS: [&str; 4] = ["Ambiental", "Social", "Gobernanza", "Riesgo"];

/// Matches `Ambiental: 80` and the bracketed form `Ambiental: [80]` some
/// models produce when echoing the requested format.
static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Ambiental|Social|Gobernanza|Riesgo):\s*\[?(\d+)\]?")
        .expect("score pattern compiles")
});

/// The four-pillar numeric profile, 0..=100 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub environmental: u8,
    pub social: u8,
    pub governance: u8,
    pub risk: u8,
}

impl ScoreSet {
    /// The scores with their Spanish labels, in column order.
    pub fn labeled(&self) -> [(&'static str, u8); 4] {
        [
            (SCORE_LABELS[0], self.environmental),
            (SCORE_LABELS[1], self.social),
            (SCORE_LABELS[2], self.governance),
            (SCORE_LABELS[3], self.risk),
        ]
    }
}

/// A score token the model was asked for is missing from its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score token '{0}' not found in model reply")]
pub struct MissingScore(pub &'static str);

/// Extract the four scores embedded in the model's free-text profile.
///
/// The first occurrence of each label wins. Values above 100 are clamped.
pub fn extract_scores(text: &str) -> Result<ScoreSet, MissingScore> {
    let mut found: [Option<u8>; 4] = [None; 4];
    for cap in SCORE_RE.captures_iter(text) {
        let Some(index) = SCORE_LABELS.iter().position(|label| *label == &cap[1]) else {
            continue;
        };
        if found[index].is_none() {
            // Digits-only capture, so parse only fails on overflow.
            let value = cap[2].parse::<u32>().unwrap_or(u32::MAX);
            found[index] = Some(value.min(100) as u8);
        }
    }

    for (index, label) in SCORE_LABELS.iter().enumerate() {
        if found[index].is_none() {
            return Err(MissingScore(label));
        }
    }

    Ok(ScoreSet {
        environmental: found[0].unwrap_or(0),
        social: found[1].unwrap_or(0),
        governance: found[2].unwrap_or(0),
        risk: found[3].unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_all_four_scores() {
        let reply = "El inversor muestra un perfil conservador.\n\
                     Ambiental: 80, Social: 65, Gobernanza: 40, Riesgo: 90";
        let scores = extract_scores(reply).unwrap();
        assert_eq!(
            scores,
            ScoreSet {
                environmental: 80,
                social: 65,
                governance: 40,
                risk: 90
            }
        );
    }

    #[test]
    fn accepts_bracketed_scores() {
        let reply = "Ambiental: [12] Social: [0] Gobernanza: [100] Riesgo: [55]";
        let scores = extract_scores(reply).unwrap();
        assert_eq!(scores.environmental, 12);
        assert_eq!(scores.governance, 100);
    }

    #[test]
    fn first_occurrence_wins() {
        let reply = "Ambiental: 10 ... resumen: Ambiental: 99, \
                     Social: 20, Gobernanza: 30, Riesgo: 40";
        let scores = extract_scores(reply).unwrap();
        assert_eq!(scores.environmental, 10);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let reply = "Ambiental: 250, Social: 20, Gobernanza: 30, Riesgo: 40";
        let scores = extract_scores(reply).unwrap();
        assert_eq!(scores.environmental, 100);
    }

    #[test]
    fn missing_label_is_an_error() {
        let reply = "Ambiental: 80, Social: 65, Riesgo: 90";
        let err = extract_scores(reply).unwrap_err();
        assert_eq!(err, MissingScore("Gobernanza"));
    }

    #[test]
    fn prose_without_scores_is_an_error() {
        let err = extract_scores("Un perfil muy equilibrado en general.").unwrap_err();
        assert_eq!(err, MissingScore("Ambiental"));
    }
}
