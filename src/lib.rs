// src/lib.rs

pub mod airtable;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod serializers;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
