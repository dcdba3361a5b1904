// src/repositories/fakes.rs

//! In-memory stand-ins for the content provider and the cache.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    airtable::{AirtableError, AirtableRecord, ContentProvider, RecordQuery},
    cache::{Cache, CacheError},
};

/// Serves fixed records and records every call it receives.
#[derive(Default)]
pub struct FakeProvider {
    tables: HashMap<String, Vec<AirtableRecord>>,
    list_calls: Mutex<Vec<(String, RecordQuery)>>,
    get_calls: Mutex<Vec<(String, String)>>,
}

impl FakeProvider {
    pub fn with_table(table: &str, records: Vec<Value>) -> Self {
        let records = records
            .into_iter()
            .map(|r| serde_json::from_value(r).expect("valid Airtable record"))
            .collect();
        let mut tables = HashMap::new();
        tables.insert(table.to_string(), records);
        Self {
            tables,
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> Vec<(String, RecordQuery)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.get_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentProvider for FakeProvider {
    async fn get_records(
        &self,
        table: &str,
        query: &RecordQuery,
    ) -> Result<Vec<AirtableRecord>, AirtableError> {
        self.list_calls
            .lock()
            .unwrap()
            .push((table.to_string(), query.clone()));
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    async fn get_record(&self, table: &str, id: &str) -> Result<AirtableRecord, AirtableError> {
        self.get_calls
            .lock()
            .unwrap()
            .push((table.to_string(), id.to_string()));
        self.tables
            .get(table)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned()
            .ok_or_else(|| AirtableError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            })
    }
}

/// A cache whose every operation fails with the same message.
pub struct FailingCache {
    message: String,
}

impl FailingCache {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn error(&self) -> CacheError {
        CacheError::new(self.message.clone())
    }
}

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<Value>, CacheError> {
        Err(self.error())
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), CacheError> {
        Err(self.error())
    }

    async fn del(&self, _key: &str) -> Result<(), CacheError> {
        Err(self.error())
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        Err(self.error())
    }
}
