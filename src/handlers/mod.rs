// src/handlers/mod.rs

pub mod answer;
pub mod authentication;
pub mod cache;
pub mod challenge;
pub mod course_group;
pub mod user;
