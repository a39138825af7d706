use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::render::templates::{render_survey_report, Format};
use crate::store::local::{load_responses, load_surveys, save_responses, save_surveys};
use crate::survey::builder::{build_survey, next_survey_id, SurveyDraft};
use crate::survey::respond::{next_response_id, record_response};
use crate::survey::stats::{survey_report, total_responses, SurveyReport};
use crate::survey::types::{ResponseRecord, Survey};

use super::AppContext;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyListing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub questions: usize,
    pub responses: usize,
    pub created_at: DateTime<Utc>,
}

pub fn create_survey(ctx: &AppContext, draft: SurveyDraft, now: DateTime<Utc>) -> AppResult<Survey> {
    let mut surveys = load_surveys(&ctx.conn)?;
    let survey = build_survey(draft, next_survey_id(&surveys, now), now)?;
    surveys.push(survey.clone());
    save_surveys(&ctx.conn, &surveys)?;
    log::info!(
        "created survey {} '{}' with {} questions",
        survey.id,
        survey.title,
        survey.questions.len()
    );
    Ok(survey)
}

pub fn list_surveys(ctx: &AppContext) -> AppResult<Vec<SurveyListing>> {
    let surveys = load_surveys(&ctx.conn)?;
    let responses = load_responses(&ctx.conn)?;
    Ok(surveys
        .iter()
        .map(|s| SurveyListing {
            id: s.id,
            title: s.title.clone(),
            description: s.description.clone(),
            questions: s.questions.len(),
            responses: total_responses(s, &responses),
            created_at: s.created_at,
        })
        .collect())
}

pub fn get_survey(ctx: &AppContext, survey_id: i64) -> AppResult<Survey> {
    load_surveys(&ctx.conn)?
        .into_iter()
        .find(|s| s.id == survey_id)
        .ok_or(AppError::SurveyNotFound(survey_id))
}

pub fn submit_response(
    ctx: &AppContext,
    survey_id: i64,
    answers: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> AppResult<ResponseRecord> {
    let survey = get_survey(ctx, survey_id)?;
    let mut responses = load_responses(&ctx.conn)?;
    let record = match record_response(&survey, answers, next_response_id(&responses, now), now) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("response to survey {survey_id} rejected: {err}");
            return Err(err);
        }
    };
    responses.push(record.clone());
    save_responses(&ctx.conn, &responses)?;
    log::info!("stored response {} for survey {survey_id}", record.id);
    Ok(record)
}

pub fn survey_results(ctx: &AppContext, survey_id: i64) -> AppResult<SurveyReport> {
    let survey = get_survey(ctx, survey_id)?;
    let responses = load_responses(&ctx.conn)?;
    Ok(survey_report(&survey, &responses))
}

pub fn render_survey_results(ctx: &AppContext, survey_id: i64, format: Format) -> AppResult<String> {
    let report = survey_results(ctx, survey_id)?;
    render_survey_report(&ctx.tera, &report, format)
}
