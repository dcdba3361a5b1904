// src/serializers/mod.rs

pub mod airtable;
