// src/handlers/user.rs

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        jsonapi::{self, Document},
        user::CreateUserAttributes,
    },
    repositories::user::{NewUser, UserRepository},
    utils::{hash::hash_password, jwt::Claims},
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user resource (excluding password).
pub async fn save(
    State(users): State<UserRepository>,
    payload: Result<Json<Document<CreateUserAttributes>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(document) = payload?;
    let attributes = document.data.attributes;

    attributes.validate()?;

    let hashed_password = hash_password(&attributes.password)?;

    let user = users
        .create(NewUser {
            first_name: attributes.first_name.trim(),
            last_name: attributes.last_name.trim(),
            email: &attributes.email,
            password: &hashed_password,
            cgu: attributes.cgu,
        })
        .await?;

    tracing::info!(user_id = user.id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(jsonapi::document(user.to_resource())),
    ))
}

/// Returns the authenticated user.
pub async fn me(
    State(users): State<UserRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = users
        .get(claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::AuthError("Unknown user".to_string()))?;

    Ok(Json(jsonapi::document(user.to_resource())))
}
