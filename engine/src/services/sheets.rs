//! Spreadsheet submission source backed by the Google Sheets values API
//!
//! Fetches `GET {base}/v4/spreadsheets/{id}/values/{range}?key={key}`
//! and maps the header row onto submission record fields. Missing
//! cells become empty strings; rejecting malformed rows is the
//! extractor's job, not this client's.

use chrono::DateTime;
use reqwest::Url;
use serde::Deserialize;
use shared::SubmissionRecord;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::traits::SubmissionSource;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
const DEFAULT_RANGE: &str = "Form Responses 1";

pub struct SheetsSubmissionSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    range: String,
}

/// Shape of the values API response
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsSubmissionSource {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            range: DEFAULT_RANGE.to_string(),
        }
    }

    /// Override the API base URL (used against a local stub in tests)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the sheet range to read
    pub fn with_range(mut self, range: String) -> Self {
        self.range = range;
        self
    }

    fn values_url(&self, source_id: &str) -> EngineResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|_| EngineError::Configuration {
            field: "sheets base URL".to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| EngineError::Configuration {
                field: "sheets base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", source_id, "values", self.range.as_str()]);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SubmissionSource for SheetsSubmissionSource {
    async fn fetch_submissions(&self, source_id: &str) -> EngineResult<Vec<SubmissionRecord>> {
        let url = self.values_url(source_id)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EngineError::fetch(format!("request to sheets API failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::fetch(format!(
                "sheets API returned HTTP {status} for source '{source_id}'"
            )));
        }

        let body: ValuesResponse = response
            .json()
            .await
            .map_err(|e| EngineError::fetch(format!("sheets API response was not valid JSON: {e}")))?;

        let records = rows_to_records(&body.values);
        debug!(source_id, rows = body.values.len(), records = records.len(), "fetched sheet values");
        Ok(records)
    }
}

/// Column roles recognized in the header row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Column {
    CourseId,
    AssignmentTitle,
    FirstName,
    LastName,
    Email,
    SubmittedAt,
}

fn column_role(header: &str) -> Option<Column> {
    let normalized: String = header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    match normalized.as_str() {
        "courseid" | "course" | "coursecode" => Some(Column::CourseId),
        "assignmenttitle" | "assignment" => Some(Column::AssignmentTitle),
        "studentfirstname" | "firstname" => Some(Column::FirstName),
        "studentlastname" | "lastname" => Some(Column::LastName),
        "studentemail" | "email" | "emailaddress" => Some(Column::Email),
        "submittedat" | "timestamp" => Some(Column::SubmittedAt),
        _ => None,
    }
}

fn rows_to_records(values: &[Vec<String>]) -> Vec<SubmissionRecord> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };

    let columns: Vec<Option<Column>> = header.iter().map(|h| column_role(h)).collect();
    let cell = |row: &[String], role: Column| -> String {
        columns
            .iter()
            .position(|c| *c == Some(role))
            .and_then(|i| row.get(i))
            .cloned()
            .unwrap_or_default()
    };

    rows.iter()
        .map(|row| SubmissionRecord {
            course_id: cell(row, Column::CourseId),
            assignment_title: cell(row, Column::AssignmentTitle),
            student_first_name: cell(row, Column::FirstName),
            student_last_name: cell(row, Column::LastName),
            student_email: cell(row, Column::Email),
            submitted_at: DateTime::parse_from_rfc3339(&cell(row, Column::SubmittedAt))
                .ok()
                .map(|dt| dt.with_timezone(&chrono::Utc)),
        })
        .collect()
}
