// src/engine/mod.rs

pub mod assembler;
pub mod random;
pub mod sampler;
pub mod scoring;
