use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: Option<String>,
    pub progress: Option<String>,
}

impl DbUser {
    /// Parsed progress document; NULL or empty reads as a fresh document.
    pub fn progress(&self) -> Result<Progress, serde_json::Error> {
        match self.progress.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw),
            _ => Ok(Progress::default()),
        }
    }
}

/// Per-user progress document stored as JSON in `users.progress`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub completed_topics: Vec<String>,
    #[serde(default)]
    pub quiz_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub practice_sets: BTreeMap<String, Vec<String>>,
}

/// One progress event: the topic is always marked completed, score and
/// practice set overwrite whatever was stored for that topic.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub topic: String,
    pub score: Option<f64>,
    pub practice_set: Option<Vec<String>>,
}

impl ProgressUpdate {
    pub fn topic(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            score: None,
            practice_set: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_practice_set(mut self, set: Vec<String>) -> Self {
        self.practice_set = Some(set);
        self
    }
}

impl Progress {
    pub fn apply(&mut self, update: ProgressUpdate) {
        if !self.completed_topics.contains(&update.topic) {
            self.completed_topics.push(update.topic.clone());
        }
        if let Some(score) = update.score {
            self.quiz_scores.insert(update.topic.clone(), score);
        }
        if let Some(set) = update.practice_set {
            self.practice_sets.insert(update.topic, set);
        }
    }
}
