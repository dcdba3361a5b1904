// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    airtable::ContentProvider,
    cache::Cache,
    config::Config,
    repositories::{
        answer::AnswerRepository, challenge::ChallengeRepository,
        course_group::CourseGroupRepository, user::UserRepository,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub content: Arc<dyn ContentProvider>,
    pub cache: Arc<dyn Cache>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Cache> {
    fn from_ref(state: &AppState) -> Self {
        state.cache.clone()
    }
}

impl FromRef<AppState> for AnswerRepository {
    fn from_ref(state: &AppState) -> Self {
        AnswerRepository::new(state.pool.clone())
    }
}

impl FromRef<AppState> for UserRepository {
    fn from_ref(state: &AppState) -> Self {
        UserRepository::new(state.pool.clone())
    }
}

impl FromRef<AppState> for ChallengeRepository {
    fn from_ref(state: &AppState) -> Self {
        ChallengeRepository::new(state.content.clone(), state.cache.clone())
    }
}

impl FromRef<AppState> for CourseGroupRepository {
    fn from_ref(state: &AppState) -> Self {
        CourseGroupRepository::new(state.content.clone(), state.cache.clone())
    }
}
