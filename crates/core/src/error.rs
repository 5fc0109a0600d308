use thiserror::Error;

/// Errors raised while loading, converting or persisting a show plan.
///
/// Scheduling itself never fails: inconsistent plans (missing dependencies,
/// negative durations) resolve to well-defined fallback times instead.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid value {value:?} for field `{field}`")]
    Validation { field: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    pub fn validation(field: &'static str, value: impl Into<String>) -> Self {
        PlanError::Validation {
            field,
            value: value.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PlanError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
