use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppResult;
use crate::survey::types::{ResponseRecord, Survey};

use super::{get_item, set_item};

pub const SURVEYS_KEY: &str = "surveys";
pub const RESPONSES_KEY: &str = "responses";
const LAST_SUBMISSION_KEY: &str = "lastSubmissionTime";

fn read_list<T: DeserializeOwned>(conn: &Connection, key: &str) -> AppResult<Vec<T>> {
    match get_item(conn, key)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

fn write_list<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> AppResult<()> {
    set_item(conn, key, &serde_json::to_string(items)?)
}

pub fn load_surveys(conn: &Connection) -> AppResult<Vec<Survey>> {
    read_list(conn, SURVEYS_KEY)
}

pub fn save_surveys(conn: &Connection, surveys: &[Survey]) -> AppResult<()> {
    write_list(conn, SURVEYS_KEY, surveys)
}

pub fn load_responses(conn: &Connection) -> AppResult<Vec<ResponseRecord>> {
    read_list(conn, RESPONSES_KEY)
}

pub fn save_responses(conn: &Connection, responses: &[ResponseRecord]) -> AppResult<()> {
    write_list(conn, RESPONSES_KEY, responses)
}

pub fn last_submission_at(conn: &Connection) -> AppResult<Option<DateTime<Utc>>> {
    let Some(raw) = get_item(conn, LAST_SUBMISSION_KEY)? else {
        return Ok(None);
    };
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(t) => Ok(Some(t.with_timezone(&Utc))),
        Err(err) => {
            log::warn!("ignoring unreadable {LAST_SUBMISSION_KEY} '{raw}': {err}");
            Ok(None)
        }
    }
}

pub fn set_last_submission_at(conn: &Connection, at: DateTime<Utc>) -> AppResult<()> {
    set_item(conn, LAST_SUBMISSION_KEY, &at.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::{
        last_submission_at, load_responses, load_surveys, save_responses, save_surveys,
        set_last_submission_at,
    };
    use crate::store::{open_in_memory, set_item};
    use crate::survey::types::{Question, QuestionType, ResponseRecord, Survey};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    #[test]
    fn surveys_and_responses_round_trip_under_fixed_keys() {
        let conn = open_in_memory().expect("db");
        assert!(load_surveys(&conn).expect("empty").is_empty());

        let survey = Survey {
            id: 1_700_000_000_000,
            title: "Canteen".to_string(),
            description: "Weekly".to_string(),
            questions: vec![Question {
                id: 1,
                text: "Rate lunch".to_string(),
                question_type: QuestionType::Rating,
                choices: vec![],
            }],
            created_at: Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap(),
        };
        save_surveys(&conn, &[survey.clone()]).expect("save surveys");
        assert_eq!(load_surveys(&conn).expect("load"), vec![survey.clone()]);

        let response = ResponseRecord {
            id: 1_700_000_000_500,
            survey_id: survey.id,
            answers: HashMap::from([("q_1".to_string(), "4".to_string())]),
            submitted_at: Utc.with_ymd_and_hms(2023, 11, 15, 9, 0, 0).unwrap(),
        };
        save_responses(&conn, &[response.clone()]).expect("save responses");
        assert_eq!(load_responses(&conn).expect("load"), vec![response]);
    }

    #[test]
    fn stored_json_uses_camel_case_fields() {
        let conn = open_in_memory().expect("db");
        set_item(
            &conn,
            "surveys",
            r#"[{"id":5,"title":"T","description":"","createdAt":"2024-01-01T00:00:00Z",
            "questions":[{"id":1,"text":"Pick","type":"single_choice","choices":["A","B"]}]}]"#,
        )
        .expect("seed");
        let surveys = load_surveys(&conn).expect("load");
        assert_eq!(surveys[0].questions[0].question_type, QuestionType::SingleChoice);
    }

    #[test]
    fn remembers_last_submission_time() {
        let conn = open_in_memory().expect("db");
        assert_eq!(last_submission_at(&conn).expect("none"), None);
        let at = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        set_last_submission_at(&conn, at).expect("set");
        assert_eq!(last_submission_at(&conn).expect("some"), Some(at));
    }

    #[test]
    fn unreadable_last_submission_time_is_treated_as_unset() {
        let conn = open_in_memory().expect("db");
        set_item(&conn, "lastSubmissionTime", "yesterday").expect("seed");
        assert_eq!(last_submission_at(&conn).expect("unreadable"), None);
    }
}
