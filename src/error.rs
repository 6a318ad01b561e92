//! Error types for the directive rewriter boundaries.
//!
//! The rewrite itself never fails. Errors only come from decoding a tree or an
//! options document, and from the JSX front-end.

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_INVALID_TREE: &str = "JD-ERR-TREE";
pub const ERR_INVALID_OPTIONS: &str = "JD-ERR-OPTIONS";
pub const ERR_JSX_SYNTAX: &str = "JD-ERR-JSX-SYNTAX";
pub const ERR_UNSUPPORTED_JSX: &str = "JD-ERR-JSX-UNSUPPORTED";
pub const ERR_EMPTY_JSX: &str = "JD-ERR-JSX-EMPTY";

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    #[error("invalid rewrite options: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    #[error("JSX syntax error: {}", .messages.join("; "))]
    JsxSyntax { messages: Vec<String> },

    #[error("unsupported JSX construct: {construct}")]
    UnsupportedJsx { construct: String },

    #[error("source does not contain a JSX element or fragment")]
    EmptyJsx,
}

impl RewriteError {
    pub fn unsupported(construct: impl Into<String>) -> Self {
        RewriteError::UnsupportedJsx {
            construct: construct.into(),
        }
    }

    /// Stable code for callers that match on the error kind across the Node bridge.
    pub fn code(&self) -> &'static str {
        match self {
            RewriteError::InvalidTree(_) => ERR_INVALID_TREE,
            RewriteError::InvalidOptions(_) => ERR_INVALID_OPTIONS,
            RewriteError::JsxSyntax { .. } => ERR_JSX_SYNTAX,
            RewriteError::UnsupportedJsx { .. } => ERR_UNSUPPORTED_JSX,
            RewriteError::EmptyJsx => ERR_EMPTY_JSX,
        }
    }
}

#[cfg(feature = "napi")]
impl From<RewriteError> for napi::Error {
    fn from(err: RewriteError) -> Self {
        napi::Error::from_reason(format!("[{}] {}", err.code(), err))
    }
}
