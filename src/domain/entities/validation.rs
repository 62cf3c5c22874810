use crate::helper::error_chain_fmt;

/// A record payload was rejected before reaching storage.
///
/// Carries the offending field name so the transport layer can surface
/// actionable messages without inspecting the payload again.
#[derive(thiserror::Error, Clone)]
#[error("invalid field `{field}`: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl std::fmt::Debug for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// A required string field counts as present only when it has visible content.
pub(crate) fn require_non_blank(
    field: &'static str,
    value: String,
) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError {
            field,
            reason: "required and must not be blank".into(),
        });
    }
    Ok(value)
}

/// Inclusive range check. Rejects NaN as out of range rather than letting it
/// slip through a negated comparison.
pub(crate) fn check_closed_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    if !(value >= min && value <= max) {
        return Err(ValidationError {
            field,
            reason: format!("must be within [{}, {}], got {}", min, max, value),
        });
    }
    Ok(value)
}
