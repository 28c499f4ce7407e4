use super::ExtractError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Q:\s*(.+?)\nS:\s(.+?)\n").expect("valid practice regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeItem {
    pub question: String,
    pub solution: String,
}

/// Pull `Q: ... / S: ...` pairs out of a generated practice set, in order.
pub fn extract_practice_items(text: &str) -> Result<Vec<PracticeItem>, ExtractError> {
    // The pattern needs a newline after each solution, including the last one.
    let mut text = text.trim().to_string();
    text.push('\n');

    let items: Vec<PracticeItem> = PAIR
        .captures_iter(&text)
        .map(|caps| PracticeItem {
            question: caps[1].trim().to_string(),
            solution: caps[2].trim().to_string(),
        })
        .collect();

    if items.is_empty() {
        return Err(ExtractError::NoPracticeItems);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_pairs_including_the_last_one() {
        let text = "Here are your questions:\n\nQ: What is 2 + 3?\nS: 5\n\nQ: Solve x + 1 = 4.\nS: x = 3";
        let items = extract_practice_items(text).unwrap();
        assert_eq!(
            items,
            vec![
                PracticeItem {
                    question: "What is 2 + 3?".into(),
                    solution: "5".into()
                },
                PracticeItem {
                    question: "Solve x + 1 = 4.".into(),
                    solution: "x = 3".into()
                },
            ]
        );
    }

    #[test]
    fn question_may_span_lines() {
        let text = "Q: A train leaves at 3pm.\nHow far does it go in 2h at 60km/h?\nS: 120 km\n";
        let items = extract_practice_items(text).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].question.contains("How far"));
        assert_eq!(items[0].solution, "120 km");
    }

    #[test]
    fn unformatted_text_is_an_error() {
        assert_eq!(
            extract_practice_items("1. What is 2+2? Answer: 4"),
            Err(ExtractError::NoPracticeItems)
        );
    }
}
