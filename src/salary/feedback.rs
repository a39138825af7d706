use serde::Serialize;

use crate::util::text::parse_leading_int;

use super::range::{validate, OutOfRangeError, Validation};
use super::words::words_of;

/// What the salary field shows while the user is typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum Feedback {
    /// Nothing to show: no currency picked or no number typed yet.
    Empty,
    Words { text: String },
    Error { message: String },
}

/// Runs the salary field check on the raw form values.
pub fn salary_feedback(currency: &str, raw_amount: &str) -> Feedback {
    match check_amount(currency, raw_amount) {
        Ok(Validation::NoOp) => Feedback::Empty,
        Ok(Validation::Valid { currency, amount }) => Feedback::Words {
            text: format!("{} {}", words_of(amount), currency.spoken_name()),
        },
        Err(err) => Feedback::Error {
            message: err.to_string(),
        },
    }
}

/// Validation step of [`salary_feedback`]; non-numeric input never reaches
/// the formatter.
pub fn check_amount(currency: &str, raw_amount: &str) -> Result<Validation, OutOfRangeError> {
    validate(currency, parse_leading_int(raw_amount))
}
