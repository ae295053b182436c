//! # API Handlers
//!
//! `GET /courses` fetches the feed, keeps the courses whose English title
//! matches the configured pattern and returns them as a JSON array. Every
//! failure collapses into one fixed 500 body; the detail only goes to the log.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cq_core::{filter_courses, Condition, ConditionError, CourseField};
use serde::Serialize;
use thiserror::Error;

use crate::feed::FeedError;
use crate::AppState;

pub const COURSES_ERROR_MESSAGE: &str = "Failed to fetch course data";

/// The one condition `/courses` evaluates, compiled per request.
#[derive(Debug, Clone)]
pub struct CourseQuery {
    pub field: CourseField,
    pub matcher: String,
    pub regex: bool,
}

impl Default for CourseQuery {
    fn default() -> Self {
        Self {
            field: CourseField::EnglishTitle,
            matcher: "Programming".into(),
            regex: true,
        }
    }
}

impl CourseQuery {
    pub fn condition(&self) -> Result<Condition, ConditionError> {
        Condition::new(self.field, self.matcher.as_str(), self.regex)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Condition(#[from] ConditionError),
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Failed to fetch course data: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: COURSES_ERROR_MESSAGE,
            }),
        )
            .into_response()
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn list_courses(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let courses = state.feed.fetch().await?;
    let condition = state.query.condition()?;
    tracing::debug!(
        condition = %serde_json::to_string(&condition).unwrap_or_default(),
        "Filtering {} courses",
        courses.len()
    );

    let matched = filter_courses(&courses, &condition);
    tracing::info!("Filtered down to {} courses.", matched.len());

    // `matched` borrows from `courses`, so serialize before returning.
    Ok(Json(matched).into_response())
}
