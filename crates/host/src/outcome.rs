use core::fmt;

use types::ExecutionResult;

use crate::diff::FrameDiff;

/// Result of a top-level execution together with the root frame's pending changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Gas the top-level message was given.
    pub gas_limit: i64,

    pub result: ExecutionResult,

    /// Uncommitted changes; applying them to the store is up to the client.
    pub diff: FrameDiff,
}

impl Execution {
    pub fn new(gas_limit: i64, result: ExecutionResult, diff: FrameDiff) -> Self {
        Execution {
            gas_limit,
            result,
            diff,
        }
    }

    pub fn gas_used(&self) -> i64 {
        self.gas_limit.saturating_sub(self.result.gas_left).max(0)
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Execution ===")?;
        writeln!(f, "Status: {}", self.result.status_code)?;
        writeln!(f, "Gas used: {} of {}", self.gas_used(), self.gas_limit)?;
        write!(f, "{}", self.diff)
    }
}
