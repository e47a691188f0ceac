//! Text bar chart for the investor profile.

use crate::analysis::ScoreSet;

/// Characters in a full (score 100) bar.
const BAR_WIDTH: usize = 25;

/// Render the four scores as a horizontal bar chart.
///
/// Pure string output; the channel decides how to print it.
pub fn render(scores: &ScoreSet) -> String {
    let mut out = String::new();
    out.push_str("Perfil del Inversor\n");
    out.push_str("Puntuación (0-100)\n\n");
    for (label, value) in scores.labeled() {
        let filled = (usize::from(value) * BAR_WIDTH + 50) / 100;
        out.push_str(&format!(
            "{label:<11} {}{}  {value:>3}\n",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
        ));
    }
    out
}
