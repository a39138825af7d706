pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod salary;
pub mod store;
pub mod survey;
pub mod util;

pub use salary::range::{validate, Currency, OutOfRangeError, Validation};
pub use salary::words::words_of;
pub use survey::stats::{answer_key, compute_survey_stats, total_responses};
