use super::ExtractError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const QUIZ_LENGTH: usize = 5;

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^Q:\s*(.+?)\s*A\)\s(.+?)\s*B\)\s(.+?)\s*C\)\s(.+?)\s*D\)\s(.+?)\s*Correct:\s*([A-D])\)?\s*Explanation:\s*(.+?)\s*$",
    )
    .expect("valid quiz regex")
});

static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\A|\s)Q:").expect("valid quiz block regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    /// Rendered as `A) ...` through `D) ...`.
    pub options: Vec<String>,
    pub correct: char,
    pub explanation: String,
}

impl QuizItem {
    /// An answer counts when it starts with the correct option letter.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer
            .trim_start()
            .chars()
            .next()
            .is_some_and(|c| c.to_ascii_uppercase() == self.correct)
    }

    fn from_block(block: &str) -> Option<Self> {
        let caps = BLOCK.captures(block.trim())?;
        let options = ["A", "B", "C", "D"]
            .iter()
            .zip(2..=5)
            .map(|(letter, group)| format!("{letter}) {}", caps[group].trim()))
            .collect();
        Some(Self {
            question: caps[1].trim().to_string(),
            options,
            correct: caps[6].chars().next()?.to_ascii_uppercase(),
            explanation: caps[7].trim().to_string(),
        })
    }
}

/// Parse a generated multiple-choice quiz. Exactly `QUIZ_LENGTH` well-formed
/// blocks are required; anything else is reported rather than truncated.
pub fn extract_quiz_items(text: &str) -> Result<Vec<QuizItem>, ExtractError> {
    let items: Vec<QuizItem> = question_blocks(text)
        .into_iter()
        .filter_map(QuizItem::from_block)
        .collect();

    if items.len() != QUIZ_LENGTH {
        return Err(ExtractError::CountMismatch {
            expected: QUIZ_LENGTH,
            found: items.len(),
        });
    }
    Ok(items)
}

/// Each block runs from one `Q:` to the next one (or the end of the text).
/// Only a `Q:` at the start of the text or after whitespace opens a block, so
/// words like `FAQ:` inside a field stay part of it.
fn question_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = BLOCK_START
        .find_iter(text)
        .map(|m| m.end() - "Q:".len())
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

/// Percentage of `items` answered correctly; unanswered questions count as wrong.
pub fn score(items: &[QuizItem], answers: &[Option<String>]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let correct = items
        .iter()
        .zip(answers.iter())
        .filter(|(item, answer)| answer.as_deref().is_some_and(|a| item.is_correct(a)))
        .count();
    correct as f64 * 100.0 / items.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(n: usize, correct: char) -> String {
        format!(
            "Q: What is {n} + {n}?\nA) {}\nB) {}\nC) {}\nD) {}\nCorrect: {correct}\nExplanation: Adding {n} to itself doubles it.\n\n",
            n * 2,
            n * 2 + 1,
            n * 2 + 2,
            n * 2 + 3,
        )
    }

    fn quiz(blocks: usize) -> String {
        (1..=blocks).map(|n| block(n, 'A')).collect::<String>().trim().to_string()
    }

    #[test]
    fn five_blocks_yield_five_records() {
        let items = extract_quiz_items(&quiz(5)).unwrap();
        assert_eq!(items.len(), 5);

        let third = &items[2];
        assert_eq!(third.question, "What is 3 + 3?");
        assert_eq!(
            third.options,
            vec!["A) 6", "B) 7", "C) 8", "D) 9"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert_eq!(third.correct, 'A');
        assert_eq!(third.explanation, "Adding 3 to itself doubles it.");
    }

    #[test]
    fn four_blocks_report_count_mismatch() {
        assert_eq!(
            extract_quiz_items(&quiz(4)),
            Err(ExtractError::CountMismatch {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn malformed_block_is_not_counted() {
        let mut text = quiz(4);
        text.push_str("\n\nQ: Broken question\nA) 1\nB) 2\nCorrect: B\nExplanation: missing options");
        assert_eq!(
            extract_quiz_items(&text),
            Err(ExtractError::CountMismatch {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn embedded_q_colon_stays_inside_its_field() {
        let text = quiz(5).replacen(
            "Explanation: Adding 2 to itself doubles it.",
            "Explanation: Check the FAQ: doubling means times two.",
            1,
        );
        let text = text.replacen("Q: What is 4 + 4?", "Q: An IQ: test asks, what is 4 + 4?", 1);

        let items = extract_quiz_items(&text).unwrap();
        assert_eq!(items[1].explanation, "Check the FAQ: doubling means times two.");
        assert_eq!(items[3].question, "An IQ: test asks, what is 4 + 4?");
        assert_eq!(items[3].options[0], "A) 8");
    }

    #[test]
    fn scoring_uses_option_prefix() {
        let items = extract_quiz_items(&quiz(5)).unwrap();
        let answers = vec![
            Some("A) 2".to_string()),
            Some("a".to_string()),
            Some("B) 7".to_string()),
            None,
            Some("A".to_string()),
        ];
        assert_eq!(score(&items, &answers), 60.0);
    }
}
