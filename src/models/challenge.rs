// src/models/challenge.rs

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::models::jsonapi;

/// A challenge as defined in the content base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,

    pub instruction: Option<String>,

    /// Raw proposals text, one proposal per line for choice questions.
    pub proposals: Option<String>,

    /// Type label as written in the content base (e.g. "QCU", "QROCM-ind").
    pub challenge_type: String,

    /// Expected answer, interpreted according to the type.
    pub solution: Option<String>,

    pub illustration_url: Option<String>,
}

/// Comparison rule applied to submitted answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeType {
    /// Single choice.
    Qcu,
    /// Multiple choice.
    Qcm,
    /// Short free-text answer.
    Qroc,
    /// Several free-text fields, each with its own accepted answers.
    QrocmInd,
    /// Several free-text fields sharing one pool of accepted answers.
    QrocmDep,
    Unknown,
}

impl ChallengeType {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "QCU" => ChallengeType::Qcu,
            "QCM" => ChallengeType::Qcm,
            "QROC" => ChallengeType::Qroc,
            "QROCM" | "QROCM-ind" => ChallengeType::QrocmInd,
            "QROCM-dep" => ChallengeType::QrocmDep,
            _ => ChallengeType::Unknown,
        }
    }
}

impl Challenge {
    pub fn kind(&self) -> ChallengeType {
        ChallengeType::from_label(&self.challenge_type)
    }

    /// JSON:API resource for clients. The solution is never exposed.
    pub fn to_resource(&self) -> Value {
        jsonapi::resource(
            "challenges",
            &self.id,
            json!({
                "type": self.challenge_type,
                "instruction": self.instruction,
                "proposals": self.proposals,
                "illustration-url": self.illustration_url,
            }),
            None,
        )
    }
}
