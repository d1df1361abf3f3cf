use thiserror::Error;

use crate::StatusCode;

pub type BridgeResult<T> = core::result::Result<T, BridgeError>;

/// Errors raised on the host side of the VM boundary.
///
/// None of these are VM outcomes: a revert or an out-of-gas is an ordinary
/// [`crate::StatusCode`]. These are failures of the boundary itself and are always
/// surfaced to the caller of the top-level execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A binary buffer was too short (or referenced bytes outside itself).
    #[error("malformed {what}: need {expected} bytes, got {actual}")]
    Format {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The VM reported a status this host does not know.
    #[error("unknown status code {0}")]
    UnknownStatusCode(i32),

    #[error("unknown call kind {0}")]
    UnknownCallKind(i32),

    #[error("unknown revision {0}")]
    UnknownRevision(i32),

    /// A call frame would exceed the configured maximum depth.
    #[error("call depth {depth} exceeds the maximum of {max}")]
    CallDepthExceeded { depth: u32, max: u32 },

    /// The VM broke a callback contract (e.g. too many log topics).
    #[error("capability violation: {0}")]
    CapabilityViolation(String),

    #[error("vm panicked: {0}")]
    VmPanicked(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    pub fn format(what: &'static str, expected: usize, actual: usize) -> Self {
        BridgeError::Format {
            what,
            expected,
            actual,
        }
    }

    /// Status a VM is answered with when this error ends one of its calls.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::CallDepthExceeded { .. } => StatusCode::CallDepthExceeded,
            _ => StatusCode::InternalError,
        }
    }
}
