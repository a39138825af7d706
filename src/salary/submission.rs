use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::util::text::{parse_leading_int, search_key};

use super::range::{check_range, Currency};

const DEFAULT_COMPANY: &str = "Anonymous";
const DEFAULT_NOTES: &str = "No additional notes";
const DEFAULT_COMPANY_SIZE: &str = "Not specified";

const RATING_LABELS: &[&str] = &["Poor", "Fair", "Average", "Good", "Excellent"];

pub fn rating_label(rating: u8) -> Option<&'static str> {
    match rating {
        1..=5 => Some(RATING_LABELS[(rating - 1) as usize]),
        _ => None,
    }
}

/// Salary as typed into the form, either a JSON number or raw text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SalaryField {
    Number(i64),
    Fractional(f64),
    Text(String),
}

impl SalaryField {
    fn amount(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Fractional(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Fractional(_) => None,
            Self::Text(raw) => parse_leading_int(raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[serde(default)]
    pub company: String,
    pub job_title: String,
    pub currency: String,
    pub salary: SalaryField,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub company_rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySubmission {
    pub company: String,
    pub job_title: String,
    pub currency: Currency,
    pub salary: u64,
    pub benefits: Vec<String>,
    pub notes: String,
    pub industry: String,
    pub experience: String,
    pub location: String,
    pub company_size: String,
    /// Unescaped search key; never rendered.
    pub job_title_lower: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_rating: Option<u8>,
}

/// HTML-entity-encodes `& < > " ' /` in user supplied text.
pub fn sanitize_input(input: &str) -> String {
    tera::escape_html(input)
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn required(value: &str, field: &'static str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

pub fn build_submission(form: SubmissionForm, now: DateTime<Utc>) -> AppResult<SalarySubmission> {
    let currency = form
        .currency
        .parse::<Currency>()
        .map_err(|_| AppError::UnknownCurrency(form.currency.clone()))?;
    let amount = form
        .salary
        .amount()
        .ok_or(AppError::MissingField { field: "Salary" })?;
    let salary = check_range(currency, amount).map_err(AppError::InvalidSalary)?;

    let job_title = required(&form.job_title, "Job title")?;
    let location = required(&form.location, "Location")?;

    // A rating only applies to a named company.
    let company_rating = if form.company.trim().is_empty() {
        None
    } else {
        form.company_rating
    };
    if let Some(rating) = company_rating {
        if rating_label(rating).is_none() {
            return Err(AppError::InvalidRating(rating));
        }
    }

    let benefits = form
        .benefits
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(sanitize_input)
        .collect::<Vec<String>>();

    Ok(SalarySubmission {
        company: sanitize_input(&or_default(&form.company, DEFAULT_COMPANY)),
        job_title_lower: search_key(&job_title),
        job_title: sanitize_input(&job_title),
        currency,
        salary,
        benefits,
        notes: sanitize_input(&or_default(&form.notes, DEFAULT_NOTES)),
        industry: sanitize_input(form.industry.trim()),
        experience: sanitize_input(form.experience.trim()),
        location: sanitize_input(&location),
        company_size: sanitize_input(&or_default(&form.company_size, DEFAULT_COMPANY_SIZE)),
        timestamp: now,
        company_rating,
    })
}

/// Rejects a submission attempt that follows the previous one too closely.
/// Every attempt that gets past the throttle counts, valid or not.
#[derive(Debug, Clone)]
pub struct SubmissionThrottle {
    window: Duration,
    last_attempt: Option<DateTime<Utc>>,
}

impl SubmissionThrottle {
    pub fn new(window_secs: u64, last_attempt: Option<DateTime<Utc>>) -> AppResult<Self> {
        let window = i64::try_from(window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                AppError::InvalidSettings(format!(
                    "submissionThrottleSecs {window_secs} is too large"
                ))
            })?;
        Ok(Self {
            window,
            last_attempt,
        })
    }

    pub fn last_attempt(&self) -> Option<DateTime<Utc>> {
        self.last_attempt
    }

    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(last) = self.last_attempt {
            let elapsed = now - last;
            if elapsed < self.window {
                let remaining = (self.window - elapsed).num_seconds().max(1) as u64;
                return Err(AppError::Throttled {
                    retry_after_secs: remaining,
                });
            }
        }
        self.last_attempt = Some(now);
        Ok(())
    }
}
