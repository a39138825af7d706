use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::util::text::normalize_whitespace;

use super::types::{Question, QuestionType, Survey};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

/// Creation-time id in milliseconds, bumped past `existing` so two surveys
/// created within the same millisecond stay distinct.
pub fn next_survey_id(existing: &[Survey], now: DateTime<Utc>) -> i64 {
    timestamp_id(existing.iter().map(|s| s.id).max(), now)
}

pub(crate) fn timestamp_id(latest: Option<i64>, now: DateTime<Utc>) -> i64 {
    match latest {
        Some(latest) => now.timestamp_millis().max(latest.saturating_add(1)),
        None => now.timestamp_millis(),
    }
}

fn build_question(index: usize, draft: QuestionDraft) -> AppResult<Question> {
    let id = (index + 1) as u32;
    let text = normalize_whitespace(&draft.text);
    if text.is_empty() {
        return Err(AppError::InvalidSurvey(format!("question {id} has no text")));
    }

    let choices = match draft.question_type {
        QuestionType::SingleChoice => {
            let choices = draft
                .choices
                .iter()
                .map(|c| normalize_whitespace(c))
                .filter(|c| !c.is_empty())
                .collect::<Vec<String>>();
            if choices.is_empty() {
                return Err(AppError::InvalidSurvey(format!(
                    "question {id} needs at least one choice"
                )));
            }
            choices
        }
        // Only single-choice questions carry options.
        QuestionType::FreeText | QuestionType::Rating => Vec::new(),
    };

    Ok(Question {
        id,
        text,
        question_type: draft.question_type,
        choices,
    })
}

/// Validates a draft and numbers its questions from 1 in the given order.
pub fn build_survey(draft: SurveyDraft, id: i64, now: DateTime<Utc>) -> AppResult<Survey> {
    let title = normalize_whitespace(&draft.title);
    if title.is_empty() {
        return Err(AppError::InvalidSurvey("title is required".to_string()));
    }
    if draft.questions.is_empty() {
        return Err(AppError::InvalidSurvey(
            "a survey needs at least one question".to_string(),
        ));
    }

    let questions = draft
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| build_question(i, q))
        .collect::<AppResult<Vec<Question>>>()?;

    Ok(Survey {
        id,
        title,
        description: draft.description.trim().to_string(),
        questions,
        created_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::{build_survey, next_survey_id, SurveyDraft};
    use crate::error::AppError;
    use crate::survey::types::QuestionType;
    use chrono::{Duration, TimeZone, Utc};

    fn draft(raw: &str) -> SurveyDraft {
        serde_json::from_str(raw).expect("draft json")
    }

    #[test]
    fn numbers_questions_from_one() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap();
        let survey = build_survey(
            draft(
                r#"{"title":" Lunch  poll ","questions":[
                {"text":"Cuisine?","type":"single_choice","choices":["Thai"," ","Pizza"]},
                {"text":"Rate the last one","type":"rating_1_5","choices":["ignored"]},
                {"text":"Comments","type":"free_text"}]}"#,
            ),
            42,
            now,
        )
        .expect("valid survey");
        assert_eq!(survey.title, "Lunch poll");
        assert_eq!(survey.id, 42);
        assert_eq!(survey.created_at, now);
        let ids = survey.questions.iter().map(|q| q.id).collect::<Vec<u32>>();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(survey.questions[0].choices, vec!["Thai", "Pizza"]);
        assert_eq!(survey.questions[1].question_type, QuestionType::Rating);
        assert!(survey.questions[1].choices.is_empty());
    }

    #[test]
    fn single_choice_requires_choices() {
        let err = build_survey(
            draft(r#"{"title":"T","questions":[{"text":"Pick","type":"single_choice","choices":[" "]}]}"#),
            1,
            Utc::now(),
        )
        .expect_err("no choices");
        assert!(matches!(err, AppError::InvalidSurvey(_)));
    }

    #[test]
    fn rejects_untitled_or_empty_surveys() {
        assert!(build_survey(
            draft(r#"{"title":"  ","questions":[{"text":"Q","type":"free_text"}]}"#),
            1,
            Utc::now()
        )
        .is_err());
        assert!(build_survey(draft(r#"{"title":"T","questions":[]}"#), 1, Utc::now()).is_err());
    }

    #[test]
    fn survey_ids_stay_unique_within_a_millisecond() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap();
        let first = build_survey(
            draft(r#"{"title":"A","questions":[{"text":"Q","type":"free_text"}]}"#),
            next_survey_id(&[], now),
            now,
        )
        .expect("first");
        assert_eq!(first.id, now.timestamp_millis());
        let second_id = next_survey_id(&[first.clone()], now);
        assert_eq!(second_id, first.id + 1);
        let later = now + Duration::seconds(1);
        assert_eq!(next_survey_id(&[first], later), later.timestamp_millis());
    }
}
