// src/core/mod.rs
pub mod matcher;
pub mod normalizer;
pub mod sampler;
pub mod session;
pub mod types;
