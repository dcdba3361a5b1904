// src/models/answer.rs

use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::FromRow;

use crate::models::jsonapi;

/// Outcome of an answer evaluation, stored lower-case in `answers.result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Ok,
    Ko,
    /// The user skipped the challenge.
    Aband,
    /// The challenge type has no comparison rule.
    Unimplemented,
}

impl AnswerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerStatus::Ok => "ok",
            AnswerStatus::Ko => "ko",
            AnswerStatus::Aband => "aband",
            AnswerStatus::Unimplemented => "unimplemented",
        }
    }
}

impl fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the 'answers' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Answer {
    pub id: i64,

    /// Raw submitted value. TEXT column, never truncated.
    pub value: Option<String>,

    pub result: Option<String>,

    /// YAML rendering of per-field evaluation details.
    pub result_details: Option<String>,

    /// Milliseconds spent by the user, as reported by the client.
    pub elapsed_time: Option<i64>,

    pub assessment_id: String,

    /// Id of the challenge in the content base.
    pub challenge_id: String,
}

impl Answer {
    pub fn to_resource(&self) -> Value {
        jsonapi::resource(
            "answers",
            self.id,
            json!({
                "value": self.value,
                "result": self.result,
                "result-details": self.result_details,
                "elapsed-time": self.elapsed_time,
            }),
            Some(json!({
                "assessment": jsonapi::to_one("assessments", &self.assessment_id),
                "challenge": jsonapi::to_one("challenges", &self.challenge_id),
            })),
        )
    }
}

/// Attributes of a `POST /api/answers` payload.
#[derive(Debug, Deserialize)]
pub struct CreateAnswerAttributes {
    pub value: Option<String>,
    #[serde(rename = "elapsed-time", default)]
    pub elapsed_time: Option<i64>,
}

/// An evaluated answer ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub value: String,
    pub result: AnswerStatus,
    pub result_details: String,
    pub elapsed_time: Option<i64>,
    pub assessment_id: String,
    pub challenge_id: String,
}
