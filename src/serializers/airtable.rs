// src/serializers/airtable.rs

//! Conversions from raw Airtable rows to domain models.
//! Field names are the column labels of the content base.

use serde_json::Value;

use crate::{
    airtable::AirtableRecord,
    models::{challenge::Challenge, course_group::CourseGroup},
};

pub trait RecordSerializer {
    type Output;

    fn deserialize(record: &AirtableRecord) -> Self::Output;
}

pub struct CourseGroupSerializer;

impl RecordSerializer for CourseGroupSerializer {
    type Output = CourseGroup;

    fn deserialize(record: &AirtableRecord) -> CourseGroup {
        CourseGroup {
            id: record.id.clone(),
            name: record.field_str("Nom").unwrap_or_default().to_string(),
            course_ids: record.field_str_list("Tests"),
        }
    }
}

pub struct ChallengeSerializer;

impl RecordSerializer for ChallengeSerializer {
    type Output = Challenge;

    fn deserialize(record: &AirtableRecord) -> Challenge {
        let illustration_url = record
            .fields
            .get("Illustration de la consigne")
            .and_then(Value::as_array)
            .and_then(|attachments| attachments.first())
            .and_then(|attachment| attachment.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Challenge {
            id: record.id.clone(),
            instruction: record.field_str("Consigne").map(str::to_string),
            proposals: record.field_str("Propositions").map(str::to_string),
            challenge_type: record
                .field_str("Type d'épreuve")
                .unwrap_or_default()
                .to_string(),
            solution: record.field_str("Bonnes réponses").map(str::to_string),
            illustration_url,
        }
    }
}
