//! Error types.
//!
//! Only caller mistakes are errors. Scheduling declines are reported in
//! [`RunResult`](crate::models::RunResult) and unknown ids on reschedule
//! return `false`.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by the engine's registration and configuration APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("duplicate order id: {0}")]
    DuplicateOrder(String),

    #[error("duplicate equipment id: {0}")]
    DuplicateEquipment(String),

    #[error("duplicate material code: {0}")]
    DuplicateMaterial(String),

    #[error("invalid {entity} '{id}': {}", summarize(.errors))]
    Validation {
        entity: &'static str,
        id: String,
        errors: Vec<ValidationError>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;
