// src/models/mod.rs

pub mod answer;
pub mod challenge;
pub mod course_group;
pub mod jsonapi;
pub mod user;
