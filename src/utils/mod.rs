// src/utils/mod.rs

pub mod exam_token;
