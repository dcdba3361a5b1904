// src/models/course_group.rs

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::models::jsonapi;

/// A named group of courses ("Groupes de tests" in the content base).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseGroup {
    pub id: String,
    pub name: String,
    pub course_ids: Vec<String>,
}

impl CourseGroup {
    pub fn to_resource(&self) -> Value {
        let courses: Vec<Value> = self
            .course_ids
            .iter()
            .map(|id| json!({ "type": "courses", "id": id }))
            .collect();

        jsonapi::resource(
            "course-groups",
            &self.id,
            json!({ "name": self.name }),
            Some(json!({ "courses": { "data": courses } })),
        )
    }
}
