//! Escape Classification Application Layer

pub mod classify_service;

pub use classify_service::{classify, classify_batch, classify_with, EscapeClassificationService};
