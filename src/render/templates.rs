use serde::Serialize;
use tera::{Context, Tera};

use crate::error::AppResult;
use crate::salary::search::SearchOutcome;
use crate::survey::stats::SurveyReport;
use crate::util::text::group_thousands;

const SURVEY_RESULTS_TXT: &str = "survey_results.txt";
// The .html suffix turns tera's autoescaping on for this template.
const SURVEY_RESULTS_HTML: &str = "survey_results.html";
const SALARY_SEARCH_TXT: &str = "salary_search.txt";

pub fn load_templates() -> AppResult<Tera> {
  let mut tera = Tera::default();
  tera.add_raw_templates(vec![
    (SURVEY_RESULTS_TXT, include_str!("../../templates/survey_results.txt.tera")),
    (SURVEY_RESULTS_HTML, include_str!("../../templates/survey_results.html.tera")),
    (SALARY_SEARCH_TXT, include_str!("../../templates/salary_search.txt.tera")),
  ])?;
  Ok(tera)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  Text,
  Html,
}

pub fn render_survey_report(tera: &Tera, report: &SurveyReport, format: Format) -> AppResult<String> {
  let mut ctx = Context::new();
  ctx.insert("report", report);
  let name = match format {
    Format::Text => SURVEY_RESULTS_TXT,
    Format::Html => SURVEY_RESULTS_HTML,
  };
  Ok(tera.render(name, &ctx)?)
}

#[derive(Debug, Serialize)]
struct SearchView {
  job_title: String,
  not_enough: bool,
  found: usize,
  avg_usd: Option<String>,
  avg_iqd: Option<String>,
  usd_in_iqd: Option<String>,
  iqd_in_usd: Option<String>,
  rate: u64,
}

fn search_view(outcome: &SearchOutcome) -> SearchView {
  match outcome {
    SearchOutcome::NotEnoughData { job_title, found } => SearchView {
      job_title: job_title.clone(),
      not_enough: true,
      found: *found,
      avg_usd: None,
      avg_iqd: None,
      usd_in_iqd: None,
      iqd_in_usd: None,
      rate: 0,
    },
    SearchOutcome::Averages(avg) => SearchView {
      job_title: avg.job_title.clone(),
      not_enough: false,
      found: avg.submissions,
      avg_usd: avg.average_usd.map(group_thousands),
      avg_iqd: avg.average_iqd.map(group_thousands),
      usd_in_iqd: avg.usd_in_iqd().map(group_thousands),
      // Shown without separators, as on the salary page.
      iqd_in_usd: avg.iqd_in_usd().map(|v| v.to_string()),
      rate: avg.exchange_rate,
    },
  }
}

pub fn render_search(tera: &Tera, outcome: &SearchOutcome) -> AppResult<String> {
  let ctx = Context::from_serialize(search_view(outcome))?;
  Ok(tera.render(SALARY_SEARCH_TXT, &ctx)?)
}
