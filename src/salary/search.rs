use serde::Serialize;

use super::range::Currency;
use super::submission::SalarySubmission;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum SearchOutcome {
    /// Too few submissions matched to publish an average.
    NotEnoughData { job_title: String, found: usize },
    Averages(SalaryAverages),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAverages {
    pub job_title: String,
    pub submissions: usize,
    pub average_usd: Option<u64>,
    pub average_iqd: Option<u64>,
    /// IQD per USD.
    pub exchange_rate: u64,
}

impl SalaryAverages {
    pub fn usd_in_iqd(&self) -> Option<u64> {
        self.average_usd.map(|usd| usd * self.exchange_rate)
    }

    pub fn iqd_in_usd(&self) -> Option<u64> {
        self.average_iqd
            .map(|iqd| (iqd as f64 / self.exchange_rate as f64).round() as u64)
    }
}

fn rounded_mean(total: u64, count: u64) -> Option<u64> {
    if count == 0 {
        return None;
    }
    Some((total as f64 / count as f64).round() as u64)
}

/// Averages the matched submissions per currency once `min_results` is met.
pub fn summarize(
    job_title: &str,
    matches: &[SalarySubmission],
    min_results: usize,
    exchange_rate: u64,
) -> SearchOutcome {
    if matches.len() < min_results {
        return SearchOutcome::NotEnoughData {
            job_title: job_title.to_string(),
            found: matches.len(),
        };
    }

    let (mut total_usd, mut usd_count) = (0u64, 0u64);
    let (mut total_iqd, mut iqd_count) = (0u64, 0u64);
    for submission in matches {
        match submission.currency {
            Currency::Usd => {
                total_usd += submission.salary;
                usd_count += 1;
            }
            Currency::Iqd => {
                total_iqd += submission.salary;
                iqd_count += 1;
            }
        }
    }

    SearchOutcome::Averages(SalaryAverages {
        job_title: job_title.to_string(),
        submissions: matches.len(),
        average_usd: rounded_mean(total_usd, usd_count),
        average_iqd: rounded_mean(total_iqd, iqd_count),
        exchange_rate,
    })
}
