// src/repositories/answer.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::answer::{Answer, NewAnswer},
};

const COLUMNS: &str =
    "id, value, result, result_details, elapsed_time, assessment_id, challenge_id";

#[derive(Clone)]
pub struct AnswerRepository {
    pool: SqlitePool,
}

impl AnswerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Answer>, AppError> {
        let answer = sqlx::query_as::<_, Answer>(&format!(
            "SELECT {} FROM answers WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    pub async fn find_by_challenge_and_assessment(
        &self,
        challenge_id: &str,
        assessment_id: &str,
    ) -> Result<Option<Answer>, AppError> {
        let answer = sqlx::query_as::<_, Answer>(&format!(
            "SELECT {} FROM answers WHERE challenge_id = ? AND assessment_id = ?",
            COLUMNS
        ))
        .bind(challenge_id)
        .bind(assessment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    /// Inserts the answer. A second answer for the same assessment and
    /// challenge fails with `AppError::Conflict`.
    pub async fn create(&self, answer: &NewAnswer) -> Result<Answer, AppError> {
        let created = sqlx::query_as::<_, Answer>(&format!(
            r#"
            INSERT INTO answers (value, result, result_details, elapsed_time, assessment_id, challenge_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&answer.value)
        .bind(answer.result.as_str())
        .bind(&answer.result_details)
        .bind(answer.elapsed_time)
        .bind(&answer.assessment_id)
        .bind(&answer.challenge_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let err = AppError::from(e);
            if !matches!(err, AppError::Conflict(_)) {
                tracing::error!("Failed to insert answer: {}", err);
            }
            err
        })?;

        Ok(created)
    }
}
