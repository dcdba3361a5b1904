// src/handlers/answer.rs

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        answer::{CreateAnswerAttributes, NewAnswer},
        jsonapi::{self, Document},
    },
    repositories::{answer::AnswerRepository, challenge::ChallengeRepository},
    services::solution,
};

/// Records a user's answer to a challenge.
///
/// * Rejects a second answer to the same challenge within an assessment (409).
/// * Evaluates the value against the challenge solution from the content base.
/// * Returns 201 Created with the stored answer.
pub async fn save(
    State(answers): State<AnswerRepository>,
    State(challenges): State<ChallengeRepository>,
    payload: Result<Json<Document<CreateAnswerAttributes>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(document) = payload?;
    let data = document.data;

    let assessment_id = data
        .relationship_id("assessment")
        .ok_or_else(|| AppError::BadRequest("Missing assessment relationship".to_string()))?;
    let challenge_id = data
        .relationship_id("challenge")
        .ok_or_else(|| AppError::BadRequest("Missing challenge relationship".to_string()))?;
    let value = data
        .attributes
        .value
        .ok_or_else(|| AppError::BadRequest("Missing answer value".to_string()))?;

    if answers
        .find_by_challenge_and_assessment(&challenge_id, &assessment_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "An answer to challenge '{}' already exists for assessment '{}'",
            challenge_id, assessment_id
        )));
    }

    let challenge = challenges.get(&challenge_id).await?;
    let evaluation = solution::evaluate(&challenge, &value);

    let answer = answers
        .create(&NewAnswer {
            value,
            result: evaluation.result,
            result_details: evaluation.result_details,
            elapsed_time: data.attributes.elapsed_time,
            assessment_id,
            challenge_id,
        })
        .await?;

    tracing::info!(
        answer_id = answer.id,
        challenge_id = %answer.challenge_id,
        result = %evaluation.result,
        "answer saved"
    );

    Ok((
        StatusCode::CREATED,
        Json(jsonapi::document(answer.to_resource())),
    ))
}

/// Retrieves a single answer by ID.
pub async fn get(
    State(answers): State<AnswerRepository>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let answer = answers
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Answer {} not found", id)))?;

    Ok(Json(jsonapi::document(answer.to_resource())))
}
