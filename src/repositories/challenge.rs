// src/repositories/challenge.rs

use std::sync::Arc;

use crate::{
    airtable::{ContentProvider, RecordQuery},
    cache::{self, Cache},
    error::AppError,
    models::challenge::Challenge,
    serializers::airtable::{ChallengeSerializer, RecordSerializer},
};

pub const TABLE: &str = "Epreuves";
pub const LIST_CACHE_KEY: &str = "challenge-repository_list";

pub fn cache_key(id: &str) -> String {
    format!("challenge-repository_get_{}", id)
}

/// Challenges read through the cache.
#[derive(Clone)]
pub struct ChallengeRepository {
    provider: Arc<dyn ContentProvider>,
    cache: Arc<dyn Cache>,
}

impl ChallengeRepository {
    pub fn new(provider: Arc<dyn ContentProvider>, cache: Arc<dyn Cache>) -> Self {
        Self { provider, cache }
    }

    pub async fn get(&self, id: &str) -> Result<Challenge, AppError> {
        cache::read_through(&self.cache, &cache_key(id), || async {
            let record = self.provider.get_record(TABLE, id).await?;
            Ok::<_, AppError>(ChallengeSerializer::deserialize(&record))
        })
        .await
    }

    pub async fn list(&self) -> Result<Vec<Challenge>, AppError> {
        cache::read_through(&self.cache, LIST_CACHE_KEY, || async {
            let records = self
                .provider
                .get_records(TABLE, &RecordQuery::default())
                .await?;
            Ok::<_, AppError>(
                records
                    .iter()
                    .map(ChallengeSerializer::deserialize)
                    .collect::<Vec<_>>(),
            )
        })
        .await
    }
}
