// src/handlers/challenge.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;

use crate::{error::AppError, models::jsonapi, repositories::challenge::ChallengeRepository};

/// Lists all challenges, without their solutions.
pub async fn list(
    State(challenges): State<ChallengeRepository>,
) -> Result<impl IntoResponse, AppError> {
    let resources: Vec<Value> = challenges
        .list()
        .await?
        .iter()
        .map(|challenge| challenge.to_resource())
        .collect();

    Ok(Json(jsonapi::document(Value::Array(resources))))
}

/// Retrieves a single challenge by ID, without its solution.
pub async fn get(
    State(challenges): State<ChallengeRepository>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let challenge = challenges.get(&id).await?;

    Ok(Json(jsonapi::document(challenge.to_resource())))
}
