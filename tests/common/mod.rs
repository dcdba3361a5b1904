// tests/common/mod.rs

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use assessment_api::{
    airtable::AirtableClient,
    cache::{Cache, MemoryCache},
    config::Config,
    repositories::user::{NewUser, UserRepository},
    routes,
    state::AppState,
    utils::hash::hash_password,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub const AIRTABLE_BASE: &str = "test-base";
pub const AIRTABLE_KEY: &str = "test-key";
pub const JWT_SECRET: &str = "test_secret_for_integration_tests";

/// Records per page served by the fake Airtable.
const PAGE_SIZE: usize = 2;

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub cache: Arc<dyn Cache>,
    pub airtable: FakeAirtable,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Inserts a user whose password is hashed like a registered one.
    pub async fn create_user(&self, email: &str, password: &str) -> i64 {
        let hashed = hash_password(password).unwrap();
        UserRepository::new(self.pool.clone())
            .create(NewUser {
                first_name: "Ada",
                last_name: "Lovelace",
                email,
                password: &hashed,
                cgu: true,
            })
            .await
            .expect("Failed to seed user")
            .id
    }

    pub async fn answers_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM answers")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

/// Airtable stand-in serving fixed tables over HTTP.
#[derive(Clone, Default)]
pub struct FakeAirtable {
    pub address: String,
    tables: Arc<HashMap<String, Vec<Value>>>,
    hits: Arc<AtomicUsize>,
}

impl FakeAirtable {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", AIRTABLE_KEY))
}

async fn list_records(
    State(airtable): State<FakeAirtable>,
    Path((base, table)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    airtable.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(records) = airtable.tables.get(&table).filter(|_| base == AIRTABLE_BASE) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let start: usize = params
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);
    let end = (start + PAGE_SIZE).min(records.len());
    let mut body = json!({ "records": records[start..end].to_vec() });
    if end < records.len() {
        body["offset"] = json!(end.to_string());
    }
    Json(body).into_response()
}

async fn get_record(
    State(airtable): State<FakeAirtable>,
    Path((base, table, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    airtable.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let record = airtable
        .tables
        .get(&table)
        .filter(|_| base == AIRTABLE_BASE)
        .and_then(|records| records.iter().find(|r| r["id"] == id.as_str()));

    match record {
        Some(record) => Json(record.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "NOT_FOUND" })),
        )
            .into_response(),
    }
}

/// Serves `tables` (table name -> records) on a random port.
pub async fn spawn_airtable(tables: HashMap<String, Vec<Value>>) -> FakeAirtable {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let airtable = FakeAirtable {
        address: format!("http://127.0.0.1:{}/v0", port),
        tables: Arc::new(tables),
        hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/v0/{base}/{table}", get(list_records))
        .route("/v0/{base}/{table}/{id}", get(get_record))
        .with_state(airtable.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    airtable
}

/// The content base used by most tests.
pub fn default_tables() -> HashMap<String, Vec<Value>> {
    let mut tables = HashMap::new();
    tables.insert(
        "Epreuves".to_string(),
        vec![
            json!({
                "id": "a_challenge_id",
                "fields": { "Type d'épreuve": "QCU", "Bonnes réponses": "1" }
            }),
            json!({
                "id": "qrocm_challenge_id",
                "fields": {
                    "Type d'épreuve": "QROCM-ind",
                    "Bonnes réponses": "num1:\n- 2\nnum2:\n- 4\n"
                }
            }),
        ],
    );
    tables.insert(
        "Groupes de tests".to_string(),
        vec![
            json!({ "id": "recG1", "fields": { "Nom": "courseGroups 1", "Tests": ["recC1"] } }),
            json!({ "id": "recG2", "fields": { "Nom": "courseGroups 2", "Tests": [] } }),
            json!({ "id": "recG3", "fields": { "Nom": "courseGroups 3" } }),
        ],
    );
    tables
}

/// Spawns the app on a random port over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(default_tables()).await
}

pub async fn spawn_app_with(tables: HashMap<String, Vec<Value>>) -> TestApp {
    let airtable = spawn_airtable(tables).await;

    // A single, never recycled connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration: 600,
        airtable_api_url: airtable.address.clone(),
        airtable_api_key: AIRTABLE_KEY.to_string(),
        airtable_base: AIRTABLE_BASE.to_string(),
        cache_ttl_seconds: 0,
        port: 0,
        rust_log: "error".to_string(),
    };

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let content = Arc::new(AirtableClient::new(
        &config.airtable_api_url,
        &config.airtable_api_key,
        &config.airtable_base,
    ));

    let state = AppState {
        pool: pool.clone(),
        config,
        content,
        cache: cache.clone(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        pool,
        cache,
        airtable,
    }
}
