use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::{AppError, AppResult};

use super::builder::timestamp_id;
use super::stats::answer_key;
use super::types::{Question, QuestionType, ResponseRecord, Survey};

pub fn next_response_id(existing: &[ResponseRecord], now: DateTime<Utc>) -> i64 {
    timestamp_id(existing.iter().map(|r| r.id).max(), now)
}

fn checked_answer(question: &Question, raw: Option<&String>) -> AppResult<String> {
    let value = raw.map(|v| v.trim()).unwrap_or("");
    if value.is_empty() {
        return Err(AppError::MissingAnswer {
            question_id: question.id,
        });
    }

    match question.question_type {
        QuestionType::FreeText => Ok(value.to_string()),
        QuestionType::SingleChoice => {
            if question.choices.iter().any(|c| c == value) {
                Ok(value.to_string())
            } else {
                Err(AppError::InvalidAnswer {
                    question_id: question.id,
                    reason: format!("'{value}' is not one of the choices"),
                })
            }
        }
        QuestionType::Rating => match value.parse::<u8>() {
            Ok(rating @ 1..=5) => Ok(rating.to_string()),
            _ => Err(AppError::InvalidAnswer {
                question_id: question.id,
                reason: format!("rating must be 1 to 5, got '{value}'"),
            }),
        },
    }
}

/// Builds a response from answers keyed by [`answer_key`]. Every question
/// must be answered; keys for unknown questions are dropped.
pub fn record_response(
    survey: &Survey,
    answers: &HashMap<String, String>,
    id: i64,
    now: DateTime<Utc>,
) -> AppResult<ResponseRecord> {
    let mut kept: HashMap<String, String> = HashMap::new();
    for question in &survey.questions {
        let key = answer_key(question.id);
        let value = checked_answer(question, answers.get(&key))?;
        kept.insert(key, value);
    }

    Ok(ResponseRecord {
        id,
        survey_id: survey.id,
        answers: kept,
        submitted_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::{next_response_id, record_response};
    use crate::error::AppError;
    use crate::survey::types::{Question, QuestionType, Survey};
    use chrono::Utc;
    use std::collections::HashMap;

    fn survey() -> Survey {
        Survey {
            id: 7,
            title: "Office".to_string(),
            description: String::new(),
            questions: vec![
                Question {
                    id: 1,
                    text: "Floor".to_string(),
                    question_type: QuestionType::SingleChoice,
                    choices: vec!["First".to_string(), "Second".to_string()],
                },
                Question {
                    id: 2,
                    text: "Noise level".to_string(),
                    question_type: QuestionType::Rating,
                    choices: vec![],
                },
                Question {
                    id: 3,
                    text: "Ideas".to_string(),
                    question_type: QuestionType::FreeText,
                    choices: vec![],
                },
            ],
            created_at: Utc::now(),
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn accepts_a_complete_form() {
        let now = Utc::now();
        let record = record_response(
            &survey(),
            &answers(&[("q_1", "Second"), ("q_2", " 4 "), ("q_3", "Plants"), ("q_9", "x")]),
            11,
            now,
        )
        .expect("complete");
        assert_eq!(record.survey_id, 7);
        assert_eq!(record.id, 11);
        assert_eq!(record.answers.len(), 3);
        assert_eq!(record.answers["q_2"], "4");
        assert!(!record.answers.contains_key("q_9"));
    }

    #[test]
    fn every_question_must_be_answered() {
        let err = record_response(
            &survey(),
            &answers(&[("q_1", "First"), ("q_2", "3"), ("q_3", "  ")]),
            1,
            Utc::now(),
        )
        .expect_err("blank text");
        assert!(matches!(err, AppError::MissingAnswer { question_id: 3 }));
    }

    #[test]
    fn rejects_unknown_choice_and_bad_rating() {
        let err = record_response(
            &survey(),
            &answers(&[("q_1", "Basement"), ("q_2", "3"), ("q_3", "ok")]),
            1,
            Utc::now(),
        )
        .expect_err("bad choice");
        assert!(matches!(err, AppError::InvalidAnswer { question_id: 1, .. }));

        let err = record_response(
            &survey(),
            &answers(&[("q_1", "First"), ("q_2", "6"), ("q_3", "ok")]),
            1,
            Utc::now(),
        )
        .expect_err("bad rating");
        assert!(matches!(err, AppError::InvalidAnswer { question_id: 2, .. }));
    }

    #[test]
    fn response_ids_follow_the_latest() {
        let now = Utc::now();
        assert_eq!(next_response_id(&[], now), now.timestamp_millis());
    }
}
