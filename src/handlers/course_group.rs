// src/handlers/course_group.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::Value;

use crate::{
    error::AppError, models::jsonapi, repositories::course_group::CourseGroupRepository,
};

/// Lists all course groups.
pub async fn list(
    State(course_groups): State<CourseGroupRepository>,
) -> Result<impl IntoResponse, AppError> {
    let resources: Vec<Value> = course_groups
        .list()
        .await?
        .iter()
        .map(|group| group.to_resource())
        .collect();

    Ok(Json(jsonapi::document(Value::Array(resources))))
}
