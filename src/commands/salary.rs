use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::render::templates::render_search;
use crate::salary::feedback::{salary_feedback, Feedback};
use crate::salary::search::{summarize, SearchOutcome};
use crate::salary::submission::{
    build_submission, SalarySubmission, SubmissionForm, SubmissionThrottle,
};
use crate::store::local::{last_submission_at, set_last_submission_at};
use crate::store::salaries::{count_salaries, find_by_title_prefix, insert_salary};

use super::AppContext;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutput {
    pub id: String,
    pub total_submissions: usize,
    pub submission: SalarySubmission,
    /// Search for the submitted job title, run right after storing it.
    pub search: Option<SearchOutcome>,
}

pub fn check_salary(currency: &str, raw_amount: &str) -> Feedback {
    salary_feedback(currency, raw_amount)
}

pub fn submit_salary(
    ctx: &AppContext,
    form: SubmissionForm,
    now: DateTime<Utc>,
) -> AppResult<SubmitOutput> {
    let mut throttle = SubmissionThrottle::new(
        ctx.settings.submission_throttle_secs,
        last_submission_at(&ctx.conn)?,
    )?;
    if let Err(err) = throttle.try_acquire(now) {
        log::warn!("salary submission throttled");
        return Err(err);
    }
    set_last_submission_at(&ctx.conn, now)?;

    let submission = match build_submission(form, now) {
        Ok(submission) => submission,
        Err(err) => {
            log::warn!("salary submission rejected: {err}");
            return Err(err);
        }
    };
    let id = insert_salary(&ctx.conn, &submission)?;
    log::info!(
        "stored salary submission {id} ({} {})",
        submission.salary,
        submission.currency
    );

    let search = search_salaries(ctx, &submission.job_title_lower)?;
    Ok(SubmitOutput {
        id,
        total_submissions: count_salaries(&ctx.conn)?,
        submission,
        search,
    })
}

/// Looks up submissions for a job title; a blank query searches nothing.
pub fn search_salaries(ctx: &AppContext, job_title: &str) -> AppResult<Option<SearchOutcome>> {
    let job_title = job_title.trim();
    if job_title.is_empty() {
        return Ok(None);
    }
    let matches = find_by_title_prefix(&ctx.conn, job_title)?;
    log::debug!("{} submissions match '{job_title}'", matches.len());
    Ok(Some(summarize(
        job_title,
        &matches,
        ctx.settings.min_search_results,
        ctx.settings.exchange_rate,
    )))
}

pub fn search_salaries_text(ctx: &AppContext, job_title: &str) -> AppResult<String> {
    match search_salaries(ctx, job_title)? {
        Some(outcome) => render_search(&ctx.tera, &outcome),
        None => Err(AppError::MissingField { field: "Job title" }),
    }
}
