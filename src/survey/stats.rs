use serde::Serialize;

use super::types::{Question, QuestionType, ResponseRecord, Survey};

/// Key under which a question's answer is stored in `ResponseRecord::answers`.
pub fn answer_key(question_id: u32) -> String {
    format!("q_{question_id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceCount {
    pub value: String,
    pub count: usize,
    /// `round(100 * count / total)`; rows need not sum to 100.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum QuestionSummary {
    /// Distinct values in first-seen order. Empty means no responses.
    Breakdown { total: usize, counts: Vec<ChoiceCount> },
    TextCount { responses: usize },
}

impl QuestionSummary {
    pub fn answered(&self) -> usize {
        match self {
            Self::Breakdown { total, .. } => *total,
            Self::TextCount { responses } => *responses,
        }
    }

    pub fn has_responses(&self) -> bool {
        self.answered() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    pub question_id: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub summary: QuestionSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyReport {
    pub survey_id: i64,
    pub title: String,
    pub total_responses: usize,
    pub questions: Vec<QuestionStats>,
}

fn answered_values<'a>(question: &Question, responses: &'a [ResponseRecord]) -> Vec<&'a str> {
    let key = answer_key(question.id);
    responses
        .iter()
        .filter_map(|r| r.answers.get(&key))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect()
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * count as f64 / total as f64).round() as u32
}

fn breakdown(values: &[&str]) -> Vec<ChoiceCount> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter().position(|(v, _)| v == value) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((*value, 1)),
        }
    }
    counts
        .into_iter()
        .map(|(value, count)| ChoiceCount {
            value: value.to_string(),
            count,
            percentage: percentage(count, values.len()),
        })
        .collect()
}

pub fn summarize_question(question: &Question, responses: &[ResponseRecord]) -> QuestionStats {
    let values = answered_values(question, responses);
    let summary = if question.question_type.is_categorical() {
        QuestionSummary::Breakdown {
            total: values.len(),
            counts: breakdown(&values),
        }
    } else {
        QuestionSummary::TextCount {
            responses: values.len(),
        }
    };
    QuestionStats {
        question_id: question.id,
        text: question.text.clone(),
        question_type: question.question_type,
        summary,
    }
}

/// Per-question summaries over `responses`, in survey order. Responses are
/// taken as given; callers filter by survey first (see [`survey_report`]).
pub fn compute_survey_stats(survey: &Survey, responses: &[ResponseRecord]) -> Vec<QuestionStats> {
    survey
        .questions
        .iter()
        .map(|q| summarize_question(q, responses))
        .collect()
}

pub fn total_responses(survey: &Survey, responses: &[ResponseRecord]) -> usize {
    responses.iter().filter(|r| r.survey_id == survey.id).count()
}

/// Filters `responses` down to `survey` and summarizes them.
pub fn survey_report(survey: &Survey, responses: &[ResponseRecord]) -> SurveyReport {
    let own = responses
        .iter()
        .filter(|r| r.survey_id == survey.id)
        .cloned()
        .collect::<Vec<ResponseRecord>>();
    SurveyReport {
        survey_id: survey.id,
        title: survey.title.clone(),
        total_responses: own.len(),
        questions: compute_survey_stats(survey, &own),
    }
}
