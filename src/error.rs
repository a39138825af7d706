use thiserror::Error;

use crate::salary::range::OutOfRangeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Please enter a valid salary amount")]
    InvalidSalary(#[source] OutOfRangeError),

    #[error("Unsupported currency '{0}'")]
    UnknownCurrency(String),

    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Company rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Please wait a moment before submitting again.")]
    Throttled { retry_after_secs: u64 },

    #[error("Survey {0} not found")]
    SurveyNotFound(i64),

    #[error("Invalid survey: {0}")]
    InvalidSurvey(String),

    #[error("Please answer question {question_id}")]
    MissingAnswer { question_id: u32 },

    #[error("Invalid answer for question {question_id}: {reason}")]
    InvalidAnswer { question_id: u32, reason: String },
}

pub type AppResult<T> = Result<T, AppError>;
