// src/models/user.rs

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::jsonapi;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Always stored lower-cased.
    pub email: String,

    /// Argon2 password hash. Never rendered by `to_resource`.
    pub password: String,

    /// Whether the user accepted the terms of use.
    pub cgu: bool,
}

impl User {
    pub fn to_resource(&self) -> Value {
        jsonapi::resource(
            "users",
            self.id,
            json!({
                "first-name": self.first_name,
                "last-name": self.last_name,
                "email": self.email,
                "cgu": self.cgu,
            }),
            None,
        )
    }
}

/// Attributes of a `POST /api/users` payload.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserAttributes {
    #[serde(rename = "first-name", default)]
    #[validate(length(min = 1, max = 255, message = "Votre prénom n'est pas renseigné."))]
    pub first_name: String,

    #[serde(rename = "last-name", default)]
    #[validate(length(min = 1, max = 255, message = "Votre nom n'est pas renseigné."))]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "Votre adresse électronique n'est pas correcte."))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = validate_password))]
    pub password: String,

    #[serde(default)]
    #[validate(custom(function = validate_cgu))]
    pub cgu: bool,
}

/// Attributes of a `POST /api/authentications` payload.
#[derive(Debug, Deserialize)]
pub struct AuthenticationAttributes {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// At least 8 characters, with at least one letter and one digit.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_letter && has_digit {
        return Ok(());
    }
    Err(ValidationError::new("invalid_password").with_message(Cow::Borrowed(
        "Votre mot de passe doit comporter au moins une lettre, un chiffre et 8 caractères.",
    )))
}

fn validate_cgu(cgu: &bool) -> Result<(), ValidationError> {
    if *cgu {
        return Ok(());
    }
    Err(ValidationError::new("cgu_not_accepted").with_message(Cow::Borrowed(
        "Vous devez accepter les conditions d'utilisation pour créer un compte.",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> CreateUserAttributes {
        CreateUserAttributes {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.net".into(),
            password: "A124B2C3#!".into(),
            cgu: true,
        }
    }

    #[test]
    fn resource_never_exposes_the_password_hash() {
        let user = User {
            id: 3,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.net".into(),
            password: "$argon2id$hash".into(),
            cgu: true,
        };

        let resource = user.to_resource();
        assert_eq!(resource["id"], "3");
        assert!(resource["attributes"].get("password").is_none());
    }

    #[test]
    fn valid_attributes_pass() {
        assert!(attributes().validate().is_ok());
    }

    #[test]
    fn password_needs_a_digit() {
        let mut attrs = attributes();
        attrs.password = "abcdefghij".into();
        let errors = attrs.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn cgu_must_be_accepted() {
        let mut attrs = attributes();
        attrs.cgu = false;
        let errors = attrs.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cgu"));
    }

    #[test]
    fn email_must_be_valid() {
        let mut attrs = attributes();
        attrs.email = "not-an-email".into();
        let errors = attrs.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
