use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "free_text")]
    FreeText,
    #[serde(rename = "single_choice")]
    SingleChoice,
    #[serde(rename = "rating_1_5")]
    Rating,
}

impl QuestionType {
    /// Categorical questions get a frequency breakdown in the results.
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::SingleChoice | Self::Rating)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: i64,
    /// Weak reference; responses outlive nothing and cascade nowhere.
    pub survey_id: i64,
    #[serde(default)]
    pub answers: HashMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}
