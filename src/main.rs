use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use salary_survey::commands::salary::{check_salary, search_salaries_text, submit_salary};
use salary_survey::commands::survey::{
    create_survey, get_survey, list_surveys, render_survey_results, submit_response,
    survey_results,
};
use salary_survey::commands::AppContext;
use salary_survey::config::DEFAULT_SETTINGS_PATH;
use salary_survey::error::AppResult;
use salary_survey::render::helpers::write_string;
use salary_survey::render::templates::Format;
use salary_survey::salary::feedback::Feedback;
use salary_survey::words_of;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Settings file; created with defaults when missing.
    #[arg(short, long, env = "SALARY_SURVEY_CONFIG", default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Spell out an amount in English words.
    Words { amount: u64 },

    /// Check a salary the way the submission form does while typing.
    Check {
        #[arg(long, default_value = "")]
        currency: String,

        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },

    /// Store a salary submission read from a JSON file.
    Submit { form: PathBuf },

    /// Average salaries for job titles starting with the query.
    Search {
        #[arg(required = true)]
        job_title: Vec<String>,
    },

    #[command(subcommand)]
    Survey(SurveyCommand),
}

#[derive(Subcommand, Debug)]
enum SurveyCommand {
    /// Create a survey from a JSON draft.
    Create { draft: PathBuf },

    List,

    Show { id: i64 },

    /// Answer a survey with a JSON object keyed q_1, q_2, ...
    Respond { id: i64, answers: PathBuf },

    Results {
        id: i64,

        #[arg(long, conflicts_with = "json")]
        html: bool,

        #[arg(long)]
        json: bool,

        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emit(content: &str, out: Option<&Path>) -> AppResult<()> {
    match out {
        Some(path) => write_string(path, content),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

fn run(args: Args) -> AppResult<()> {
    let ctx = match &args.command {
        Command::Words { amount } => {
            println!("{}", words_of(*amount));
            return Ok(());
        }
        Command::Check { currency, amount } => {
            match check_salary(currency, amount) {
                Feedback::Empty => {}
                Feedback::Words { text } => println!("{text}"),
                Feedback::Error { message } => println!("{message}"),
            }
            return Ok(());
        }
        _ => AppContext::open(&args.config)?,
    };

    match args.command {
        Command::Words { .. } | Command::Check { .. } => Ok(()),
        Command::Submit { form } => {
            let output = submit_salary(&ctx, read_json(&form)?, Utc::now())?;
            print_json(&output)
        }
        Command::Search { job_title } => {
            let text = search_salaries_text(&ctx, &job_title.join(" "))?;
            emit(&text, None)
        }
        Command::Survey(SurveyCommand::Create { draft }) => {
            print_json(&create_survey(&ctx, read_json(&draft)?, Utc::now())?)
        }
        Command::Survey(SurveyCommand::List) => print_json(&list_surveys(&ctx)?),
        Command::Survey(SurveyCommand::Show { id }) => print_json(&get_survey(&ctx, id)?),
        Command::Survey(SurveyCommand::Respond { id, answers }) => {
            let answers: HashMap<String, String> = read_json(&answers)?;
            print_json(&submit_response(&ctx, id, &answers, Utc::now())?)
        }
        Command::Survey(SurveyCommand::Results {
            id,
            html,
            json,
            out,
        }) => {
            let content = if json {
                serde_json::to_string_pretty(&survey_results(&ctx, id)?)?
            } else {
                let format = if html { Format::Html } else { Format::Text };
                render_survey_results(&ctx, id, format)?
            };
            emit(&content, out.as_deref())
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
