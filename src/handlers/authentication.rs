// src/handlers/authentication.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    config::Config,
    error::AppError,
    models::{
        jsonapi::{self, Document},
        user::AuthenticationAttributes,
    },
    repositories::user::UserRepository,
    utils::{hash::verify_password, jwt::sign_jwt},
};

/// Authenticates a user by email and password and returns a JWT token.
///
/// An unknown email and a wrong password produce the same 400 response.
pub async fn save(
    State(users): State<UserRepository>,
    State(config): State<Config>,
    payload: Result<Json<Document<AuthenticationAttributes>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(document) = payload.map_err(|_| AppError::InvalidCredentials)?;
    let credentials = document.data.attributes;

    let user = users
        .find_by_email(&credentials.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&credentials.password, &user.password)? {
        tracing::info!(user_id = user.id, "authentication failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = sign_jwt(
        user.id,
        &user.email,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(jsonapi::document(jsonapi::resource(
            "authentications",
            user.id,
            json!({ "user-id": user.id, "token": token }),
            None,
        ))),
    ))
}
