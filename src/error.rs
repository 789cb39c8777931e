//! Error taxonomy for the layout engine.
//!
//! Four distinct kinds, matching ELK's own exception hierarchy. The
//! `UnsupportedConfiguration` and `UnsupportedGraph` variants carry the
//! `org.eclipse.elk.core.*Exception: ` prefix in their `Display` text for
//! compatibility with callers that pattern-match on the original message.

use thiserror::Error;

/// Errors surfaced by [`crate::driver::LayoutDriver`] and the providers it
/// dispatches to. Propagation is flat: no variant is retried or recovered
/// from internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Top-level `graph` argument was absent.
    #[error("missing required argument: graph")]
    MissingArgument,

    /// Structural or id validation failed.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// The requested algorithm id is unknown, or an algorithmic
    /// precondition (e.g. a FIRST-constraint cycle) was violated.
    #[error("org.eclipse.elk.core.UnsupportedConfigurationException: {0}")]
    UnsupportedConfiguration(String),

    /// A cross-hierarchy edge was present under `SEPARATE_CHILDREN`.
    #[error("org.eclipse.elk.core.UnsupportedGraphException: {0}")]
    UnsupportedGraph(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_configuration_carries_prefix() {
        let err = LayoutError::UnsupportedConfiguration("\"foo.bar.baz\"".to_string());
        let msg = err.to_string();
        assert!(msg.starts_with("org.eclipse.elk.core.UnsupportedConfigurationException: "));
        assert!(msg.contains("foo.bar.baz"));
    }

    #[test]
    fn unsupported_graph_carries_prefix() {
        let err = LayoutError::UnsupportedGraph("edge e1 crosses hierarchy".to_string());
        assert!(err
            .to_string()
            .starts_with("org.eclipse.elk.core.UnsupportedGraphException: "));
    }

    #[test]
    fn invalid_graph_message_passthrough() {
        let err = LayoutError::InvalidGraph("missing id".to_string());
        assert_eq!(err.to_string(), "invalid graph: missing id");
    }

    #[test]
    fn missing_argument_message() {
        assert_eq!(
            LayoutError::MissingArgument.to_string(),
            "missing required argument: graph"
        );
    }
}
