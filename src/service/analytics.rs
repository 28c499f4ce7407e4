use crate::db::Progress;
use serde::Serialize;

/// Quiz scores at or above this count as a strength.
pub const STRENGTH_THRESHOLD: f64 = 70.0;
const RECENT_TOPICS: usize = 3;

/// Dashboard numbers derived from a progress document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub topics_completed: usize,
    pub average_quiz_score: Option<f64>,
    pub quizzes_taken: usize,
    pub practice_sets: usize,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    /// Most recently completed first.
    pub recent_topics: Vec<String>,
}

impl PerformanceSummary {
    pub fn from_progress(progress: &Progress) -> Self {
        let scores = &progress.quiz_scores;
        let average_quiz_score =
            (!scores.is_empty()).then(|| scores.values().sum::<f64>() / scores.len() as f64);

        let (strengths, areas_for_improvement): (Vec<_>, Vec<_>) = scores
            .iter()
            .partition(|(_, score)| **score >= STRENGTH_THRESHOLD);

        Self {
            topics_completed: progress.completed_topics.len(),
            average_quiz_score,
            quizzes_taken: scores.len(),
            practice_sets: progress.practice_sets.len(),
            strengths: strengths.into_iter().map(|(t, _)| t.clone()).collect(),
            areas_for_improvement: areas_for_improvement
                .into_iter()
                .map(|(t, _)| t.clone())
                .collect(),
            recent_topics: progress
                .completed_topics
                .iter()
                .rev()
                .take(RECENT_TOPICS)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ProgressUpdate;

    #[test]
    fn empty_progress_has_no_average() {
        let summary = PerformanceSummary::from_progress(&Progress::default());
        assert_eq!(summary.average_quiz_score, None);
        assert!(summary.strengths.is_empty());
        assert!(summary.recent_topics.is_empty());
    }

    #[test]
    fn splits_strengths_at_threshold() {
        let mut progress = Progress::default();
        progress.apply(ProgressUpdate::topic("Algebra").with_score(70.0));
        progress.apply(ProgressUpdate::topic("Geometry").with_score(40.0));
        progress.apply(ProgressUpdate::topic("Calculus").with_score(100.0));
        progress.apply(ProgressUpdate::topic("Statistics"));
        progress.apply(ProgressUpdate::topic("Algebra").with_practice_set(vec!["Q1".into()]));

        let summary = PerformanceSummary::from_progress(&progress);
        assert_eq!(summary.topics_completed, 4);
        assert_eq!(summary.quizzes_taken, 3);
        assert_eq!(summary.practice_sets, 1);
        assert_eq!(summary.average_quiz_score, Some(70.0));
        assert_eq!(summary.strengths, vec!["Algebra", "Calculus"]);
        assert_eq!(summary.areas_for_improvement, vec!["Geometry"]);
        assert_eq!(summary.recent_topics, vec!["Statistics", "Calculus", "Geometry"]);
    }
}
