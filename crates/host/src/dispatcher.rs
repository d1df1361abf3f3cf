use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use state::AccountStore;
use types::{BridgeError, BridgeResult, CallMessage, ExecutionResult};

use crate::config::Config;
use crate::context::HostContext;
use crate::diff::FrameDiff;
use crate::host::Host;

/// A finished frame: its result and everything it changed. Nothing has been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildOutcome {
    pub result: ExecutionResult,
    pub diff: FrameDiff,
}

impl ChildOutcome {
    fn rejected(reason: &BridgeError) -> Self {
        ChildOutcome {
            result: ExecutionResult::failure(reason.status_code()),
            diff: FrameDiff::default(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl<'v, S: AccountStore> Host<'v, S> {
    /// Runs a nested call for the current frame.
    ///
    /// `packed` is a call message as sent by the VM. The child runs one level below the
    /// current frame whatever depth the message claims. The caller decides whether to
    /// merge the returned diff.
    pub fn dispatch(&mut self, packed: &[u8]) -> BridgeResult<ChildOutcome> {
        let (message, input) = CallMessage::unpack(packed)?;
        let depth = match self.frames.current() {
            Some(parent) => parent.depth.saturating_add(1),
            None => message.depth,
        };
        self.run_frame(message.at_depth(depth), input)
    }

    /// Pushes a frame for `message`, runs the VM on it and pops the frame again on
    /// every exit path.
    pub(crate) fn run_frame(
        &mut self,
        message: CallMessage,
        input: &[u8],
    ) -> BridgeResult<ChildOutcome> {
        let max = self.config.max_call_depth;
        if message.depth >= max {
            let reason = BridgeError::CallDepthExceeded {
                depth: message.depth,
                max,
            };
            tracing::debug!(target: "dispatch", event = "depth_rejected", %reason);
            return Ok(ChildOutcome::rejected(&reason));
        }

        let code = if message.kind.is_create() {
            input.to_vec()
        } else {
            self.store.code(&message.destination).to_vec()
        };
        let packed = message.pack(input)?;

        let base = self.frames.len();
        self.frames.push(HostContext::new(message));
        tracing::debug!(
            target: "dispatch",
            event = "frame_pushed",
            depth = message.depth,
            kind = ?message.kind,
            sender = %message.sender,
            destination = %message.destination,
            code_size = code.len(),
        );

        let vm = self.vm;
        let revision = self.config.revision;
        // Nested frames recurse on the native stack, which grows in segments as needed.
        let reply = catch_unwind(AssertUnwindSafe(|| {
            stacker::maybe_grow(Config::STACK_RED_ZONE, Config::STACK_SEGMENT, || {
                vm.execute(self, revision, &packed, &code)
            })
        }));
        let frame = self.frames.unwind_to(base);

        let reply = match reply {
            Ok(reply) => reply,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::warn!(
                    target: "dispatch",
                    event = "vm_panicked",
                    depth = message.depth,
                    %reason,
                );
                return Err(BridgeError::VmPanicked(reason));
            }
        };
        let result = ExecutionResult::decode(&reply)?;
        let diff = frame.map(HostContext::into_diff).unwrap_or_default();

        tracing::debug!(
            target: "dispatch",
            event = "frame_popped",
            depth = message.depth,
            status = %result.status_code,
            gas_left = result.gas_left,
        );
        Ok(ChildOutcome { result, diff })
    }
}
