// src/repositories/mod.rs

pub mod answer;
pub mod challenge;
pub mod course_group;
pub mod user;

#[cfg(test)]
pub(crate) mod fakes;
