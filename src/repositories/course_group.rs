// src/repositories/course_group.rs

use std::sync::Arc;

use crate::{
    airtable::{ContentProvider, RecordQuery},
    cache::{self, Cache},
    error::AppError,
    models::course_group::CourseGroup,
    serializers::airtable::{CourseGroupSerializer, RecordSerializer},
};

pub const TABLE: &str = "Groupes de tests";
pub const CACHE_KEY: &str = "course-group-repository_list";

/// Course groups read through the cache.
#[derive(Clone)]
pub struct CourseGroupRepository {
    provider: Arc<dyn ContentProvider>,
    cache: Arc<dyn Cache>,
}

impl CourseGroupRepository {
    pub fn new(provider: Arc<dyn ContentProvider>, cache: Arc<dyn Cache>) -> Self {
        Self { provider, cache }
    }

    pub async fn list(&self) -> Result<Vec<CourseGroup>, AppError> {
        cache::read_through(&self.cache, CACHE_KEY, || async {
            let records = self
                .provider
                .get_records(TABLE, &RecordQuery::default())
                .await?;
            Ok::<_, AppError>(
                records
                    .iter()
                    .map(CourseGroupSerializer::deserialize)
                    .collect::<Vec<_>>(),
            )
        })
        .await
    }
}
