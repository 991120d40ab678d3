//! Review API module
//!
//! Provides the `HomeworkApi` trait, the reqwest-backed Practicum
//! client, and response shape validation.

pub mod client;
mod practicum;
mod types;

pub use client::HomeworkApi;
pub use practicum::PracticumClient;
pub use types::{Homework, check_response};
