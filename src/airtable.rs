// src/airtable.rs

//! Read-only access to the Airtable base holding challenges and course groups.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum AirtableError {
    #[error("Airtable request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Airtable record '{id}' not found in '{table}'")]
    NotFound { table: String, id: String },

    #[error("Airtable responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid Airtable URL: {0}")]
    InvalidUrl(String),
}

/// A raw Airtable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl AirtableRecord {
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Reads a linked-records or multiple-select field.
    pub fn field_str_list(&self, name: &str) -> Vec<String> {
        self.fields
            .get(name)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Selection options for `get_records`. The default selects every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub view: Option<String>,
    pub filter_by_formula: Option<String>,
    pub max_records: Option<u32>,
    pub sort: Vec<(String, SortDirection)>,
}

impl RecordQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(view) = &self.view {
            pairs.push(("view".to_string(), view.clone()));
        }
        if let Some(formula) = &self.filter_by_formula {
            pairs.push(("filterByFormula".to_string(), formula.clone()));
        }
        if let Some(max) = self.max_records {
            pairs.push(("maxRecords".to_string(), max.to_string()));
        }
        for (i, (field, direction)) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{}][field]", i), field.clone()));
            pairs.push((format!("sort[{}][direction]", i), direction.as_str().to_string()));
        }
        pairs
    }
}

/// Source of externally managed content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Lists every record of `table` matching `query`.
    async fn get_records(
        &self,
        table: &str,
        query: &RecordQuery,
    ) -> Result<Vec<AirtableRecord>, AirtableError>;

    async fn get_record(&self, table: &str, id: &str) -> Result<AirtableRecord, AirtableError>;
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<AirtableRecord>,
    offset: Option<String>,
}

/// `ContentProvider` talking to the Airtable REST API.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    http: Client,
    api_url: String,
    api_key: String,
    base: String,
}

impl AirtableClient {
    pub fn new(api_url: &str, api_key: &str, base: &str) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            base: base.to_string(),
        }
    }

    fn table_url(&self, table: &str, id: Option<&str>) -> Result<Url, AirtableError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|e| AirtableError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AirtableError::InvalidUrl(self.api_url.clone()))?;
            segments.pop_if_empty().push(&self.base).push(table);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, AirtableError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Airtable responded {}: {}", status, body);
        Err(AirtableError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ContentProvider for AirtableClient {
    async fn get_records(
        &self,
        table: &str,
        query: &RecordQuery,
    ) -> Result<Vec<AirtableRecord>, AirtableError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut url = self.table_url(table, None)?;
            {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in query.query_pairs() {
                    pairs.append_pair(&key, &value);
                }
                if let Some(offset) = &offset {
                    pairs.append_pair("offset", offset);
                }
            }

            let response = self.send(url).await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Err(AirtableError::Status {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    body: format!("table '{}' not found", table),
                });
            }

            let page: ListResponse = response.json().await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::debug!(table, count = records.len(), "fetched Airtable records");
        Ok(records)
    }

    async fn get_record(&self, table: &str, id: &str) -> Result<AirtableRecord, AirtableError> {
        let url = self.table_url(table, Some(id))?;
        let response = self.send(url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AirtableError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_encodes_table_name() {
        let client = AirtableClient::new("https://api.airtable.com/v0/", "key", "app123");
        let url = client.table_url("Groupes de tests", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.airtable.com/v0/app123/Groupes%20de%20tests"
        );

        let url = client.table_url("Epreuves", Some("rec1")).unwrap();
        assert_eq!(url.as_str(), "https://api.airtable.com/v0/app123/Epreuves/rec1");
    }

    #[test]
    fn empty_query_adds_no_parameters() {
        assert!(RecordQuery::default().query_pairs().is_empty());
    }

    #[test]
    fn query_pairs_follow_airtable_names() {
        let query = RecordQuery {
            view: Some("Grid view".into()),
            filter_by_formula: Some("{Statut} = 'validé'".into()),
            max_records: Some(10),
            sort: vec![("Nom".into(), SortDirection::Desc)],
        };

        assert_eq!(
            query.query_pairs(),
            vec![
                ("view".to_string(), "Grid view".to_string()),
                ("filterByFormula".to_string(), "{Statut} = 'validé'".to_string()),
                ("maxRecords".to_string(), "10".to_string()),
                ("sort[0][field]".to_string(), "Nom".to_string()),
                ("sort[0][direction]".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn record_field_helpers() {
        let record: AirtableRecord = serde_json::from_value(serde_json::json!({
            "id": "rec1",
            "fields": { "Nom": "Groupe", "Tests": ["t1", "t2"] }
        }))
        .unwrap();

        assert_eq!(record.field_str("Nom"), Some("Groupe"));
        assert_eq!(record.field_str_list("Tests"), vec!["t1", "t2"]);
        assert!(record.field_str_list("Missing").is_empty());
    }
}
