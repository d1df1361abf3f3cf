use std::fmt::Debug;

use types::{Revision, RESULT_SIZE};

use crate::host_interface::HostInterface;

/// Entry point of an execution engine.
pub trait Vm: Debug {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Executes `code` for the packed call `message` and returns an encoded execution
    /// result. All world-state access goes through `host`.
    fn execute(
        &self,
        host: &mut dyn HostInterface,
        revision: Revision,
        message: &[u8],
        code: &[u8],
    ) -> [u8; RESULT_SIZE];
}
