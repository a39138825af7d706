use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::AppResult;
use crate::salary::submission::SalarySubmission;
use crate::util::text::search_key;

/// Upper sentinel for prefix range scans over `job_title_lower`.
const PREFIX_END: char = '\u{f8ff}';

/// Stores a submission under a fresh document id and returns the id.
pub fn insert_salary(conn: &Connection, submission: &SalarySubmission) -> AppResult<String> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO salaries (id, job_title_lower, currency, salary, created_at, payload) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id,
            submission.job_title_lower,
            submission.currency.as_str(),
            submission.salary as i64,
            submission.timestamp.to_rfc3339(),
            serde_json::to_string(submission)?
        ],
    )?;
    Ok(id)
}

pub fn count_salaries(conn: &Connection) -> AppResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM salaries", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Submissions whose lowercase job title starts with `query`.
pub fn find_by_title_prefix(conn: &Connection, query: &str) -> AppResult<Vec<SalarySubmission>> {
    let low = search_key(query);
    let high = format!("{low}{PREFIX_END}");
    let mut stmt = conn.prepare(
        "SELECT payload FROM salaries WHERE job_title_lower >= ?1 AND job_title_lower <= ?2 \
        ORDER BY created_at",
    )?;
    let rows = stmt.query_map(params![low, high], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(serde_json::from_str::<SalarySubmission>(&row?)?);
    }
    Ok(out)
}
