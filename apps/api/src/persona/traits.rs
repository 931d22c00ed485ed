//! Personality bars — turns a free-text line like
//! `80% Introverted, 30% Intuitive` into four fixed-width trait gauges.
//!
//! Always produces one bar per axis pair, in `AXES` order. Axes the model did
//! not mention read as 0% on the left side.

use std::collections::HashMap;
use std::num::IntErrorKind;
use std::sync::LazyLock;

use regex::Regex;

/// Total cells in a bar.
pub const BAR_WIDTH: u32 = 20;
/// Left labels are padded to this width so the bars line up.
const LABEL_WIDTH: usize = 11;
const FILLED_CELL: &str = "■";
const EMPTY_CELL: &str = "-";

/// A bipolar trait dimension. The bar measures the `left` side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPair {
    pub left: &'static str,
    pub right: &'static str,
}

pub const AXES: [AxisPair; 4] = [
    AxisPair {
        left: "Introverted",
        right: "Extroverted",
    },
    AxisPair {
        left: "Intuitive",
        right: "Sensing",
    },
    AxisPair {
        left: "Feeling",
        right: "Thinking",
    },
    AxisPair {
        left: "Perceiving",
        right: "Judging",
    },
];

/// `<int>% <word>` at the start of a clause. ASCII digits only.
static TRAIT_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)%\s+(\w+)").expect("trait clause regex"));

/// Parses comma-separated `<int>% <Label>` clauses into label → percentage.
///
/// Labels are capitalized; a repeated label overwrites the earlier value.
/// Clauses that don't match are skipped.
pub fn parse_trait_scores(personality_text: &str) -> HashMap<String, u32> {
    let mut scores = HashMap::new();
    for clause in personality_text.split(',') {
        let Some(caps) = TRAIT_CLAUSE_RE.captures(clause.trim()) else {
            continue;
        };
        // More digits than fit in a u32 is still "more than 100%".
        let percent = match caps[1].parse::<u32>() {
            Ok(percent) => percent,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
            Err(_) => continue,
        };
        scores.insert(capitalize(&caps[2]), percent);
    }
    scores
}

/// Renders the four trait bars for the Personality section text.
pub fn generate_personality_bars(personality_text: &str) -> Vec<String> {
    let scores = parse_trait_scores(personality_text);
    AXES.iter()
        .map(|axis| {
            let score = scores.get(&capitalize(axis.left)).copied().unwrap_or(0);
            render_bar(axis, score)
        })
        .collect()
}

/// Number of filled cells for a percentage. Scores are clamped to 0..=100 and
/// rounded half-up.
pub fn filled_cells(score: u32) -> u32 {
    let score = score.min(100);
    (score * BAR_WIDTH * 2 + 100) / 200
}

fn render_bar(axis: &AxisPair, score: u32) -> String {
    let filled = filled_cells(score);
    let empty = BAR_WIDTH - filled;
    format!(
        "{:<width$} [{}{}] {}",
        axis.left.to_uppercase(),
        FILLED_CELL.repeat(filled as usize),
        EMPTY_CELL.repeat(empty as usize),
        axis.right.to_uppercase(),
        width = LABEL_WIDTH,
    )
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_filled(bar: &str) -> usize {
        bar.matches(FILLED_CELL).count()
    }

    fn count_empty(bar: &str) -> usize {
        let start = bar.find('[').unwrap();
        let end = bar.find(']').unwrap();
        bar[start..end].matches(EMPTY_CELL).count()
    }

    #[test]
    fn test_always_four_bars() {
        for input in [
            "",
            "garbage text with no numbers",
            "80% Introverted, 30% Intuitive, 90% Feeling, 65% Perceiving",
            ",,,,",
        ] {
            assert_eq!(generate_personality_bars(input).len(), 4, "input: {input:?}");
        }
    }

    #[test]
    fn test_bars_follow_fixed_axis_order() {
        let bars = generate_personality_bars("");
        assert!(bars[0].starts_with("INTROVERTED [") && bars[0].ends_with("] EXTROVERTED"));
        assert!(bars[1].starts_with("INTUITIVE   [") && bars[1].ends_with("] SENSING"));
        assert!(bars[2].starts_with("FEELING     [") && bars[2].ends_with("] THINKING"));
        assert!(bars[3].starts_with("PERCEIVING  [") && bars[3].ends_with("] JUDGING"));
    }

    #[test]
    fn test_bar_rendering_exact() {
        let bars = generate_personality_bars("50% Introverted");
        assert_eq!(
            bars[0],
            format!("INTROVERTED [{}{}] EXTROVERTED", "■".repeat(10), "-".repeat(10))
        );
        assert_eq!(bars[1], format!("INTUITIVE   [{}] SENSING", "-".repeat(20)));
    }

    #[test]
    fn test_scores_map_to_cells() {
        let bars = generate_personality_bars(
            "80% Introverted, 30% Intuitive, 100% Feeling, 0% Perceiving",
        );
        assert_eq!(count_filled(&bars[0]), 16);
        assert_eq!(count_filled(&bars[1]), 6);
        assert_eq!(count_filled(&bars[2]), 20);
        assert_eq!(count_filled(&bars[3]), 0);
    }

    #[test]
    fn test_width_invariant_for_every_valid_score() {
        for score in 0..=100 {
            let bar = render_bar(&AXES[0], score);
            assert_eq!(
                count_filled(&bar) + count_empty(&bar),
                BAR_WIDTH as usize,
                "score {score}"
            );
        }
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(filled_cells(2), 0); // 0.4 cells
        assert_eq!(filled_cells(3), 1); // 0.6 cells
        assert_eq!(filled_cells(52), 10); // 10.4 cells
        assert_eq!(filled_cells(53), 11); // 10.6 cells
        assert_eq!(filled_cells(65), 13);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let bars = generate_personality_bars("250% Introverted, 99999999999999999999% Feeling");
        assert_eq!(count_filled(&bars[0]), 20);
        assert_eq!(count_filled(&bars[2]), 20);
        assert_eq!(count_empty(&bars[0]), 0);
    }

    #[test]
    fn test_non_ascii_digits_are_skipped() {
        let scores = parse_trait_scores("٨٠% Introverted, 40% Feeling");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get("Feeling"), Some(&40));

        let bars = generate_personality_bars("٨٠% Introverted");
        assert_eq!(count_filled(&bars[0]), 0);
        assert_eq!(count_empty(&bars[0]), 20);
    }

    #[test]
    fn test_negative_percentages_do_not_match() {
        let scores = parse_trait_scores("-40% Introverted");
        assert!(scores.is_empty());
    }

    #[test]
    fn test_labels_are_capitalized() {
        let scores = parse_trait_scores("70% introverted, 40% FEELING");
        assert_eq!(scores.get("Introverted"), Some(&70));
        assert_eq!(scores.get("Feeling"), Some(&40));
    }

    #[test]
    fn test_duplicate_label_last_write_wins() {
        let scores = parse_trait_scores("20% Introverted, 90% Introverted");
        assert_eq!(scores.get("Introverted"), Some(&90));
    }

    #[test]
    fn test_malformed_clauses_are_skipped() {
        let scores = parse_trait_scores("Introverted 80%, 45 % Intuitive, about 60% Feeling, 75%Perceiving, 55% Judging");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get("Judging"), Some(&55));
    }

    #[test]
    fn test_right_side_labels_do_not_fill_left_bar() {
        // Only the left label of each axis is read.
        let bars = generate_personality_bars("70% Extroverted, 80% Sensing");
        assert_eq!(count_filled(&bars[0]), 0);
        assert_eq!(count_filled(&bars[1]), 0);
    }

    #[test]
    fn test_trailing_words_after_label_are_ignored() {
        let scores = parse_trait_scores("  65% Perceiving (leans flexible)");
        assert_eq!(scores.get("Perceiving"), Some(&65));
    }
}
