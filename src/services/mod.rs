// src/services/mod.rs

pub mod solution;
