//! # Course Feed
//!
//! Fetches the upstream open course-data document and decodes it into
//! [`Course`] records. One GET per call: no retry, no cache, and only the
//! HTTP client's default timeouts.

use cq_core::Course;
use thiserror::Error;

/// NTHU open course-data feed.
pub const DEFAULT_COURSE_DATA_URL: &str =
    "https://www.ccxp.nthu.edu.tw/ccxp/INQUIRE/JH/OPENDATA/open_course_data.json";

/// Upstream bodies kept in error messages are cut to this many characters.
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection, TLS or body-read failure.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body is not a JSON array of course objects.
    #[error("upstream body is not a course array: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct CourseFeed {
    http: reqwest::Client,
    url: String,
}

impl CourseFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and decode the whole feed.
    pub async fn fetch(&self) -> Result<Vec<Course>, FeedError> {
        tracing::debug!(url = %self.url, "Fetching course feed");
        let resp = check_status(self.http.get(&self.url).send().await?).await?;
        let body = resp.bytes().await?;
        let courses: Vec<Course> = serde_json::from_slice(&body)?;
        tracing::debug!(count = courses.len(), "Decoded course feed");
        Ok(courses)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, FeedError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(FeedError::Status {
        status: status.as_u16(),
        body: body.chars().take(ERROR_BODY_LIMIT).collect(),
    })
}
