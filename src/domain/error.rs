// Tag grammar errors
use thiserror::Error;

/// Failure to turn a dashboard's tags into a drill-through configuration.
/// Either variant rejects the whole dashboard; unrecognized tags are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("parameter tag '{tag}' references event '{event}' which is not declared by any ce- tag")]
    UnknownEventReference { tag: String, event: String },

    #[error("malformed parameter tag '{tag}': {reason}")]
    MalformedParameterTag { tag: String, reason: &'static str },
}
