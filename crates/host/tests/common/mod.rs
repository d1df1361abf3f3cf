#![allow(dead_code)]

use std::cell::Cell;
use std::fmt;

use types::{Address, CallMessage, ExecutionResult, Revision, RESULT_SIZE};
use vm::{HostInterface, Vm};

pub type Script = dyn Fn(&mut dyn HostInterface, &CallMessage, &[u8]) -> ExecutionResult;

/// VM double that runs a closure instead of bytecode. The closure gets the decoded
/// message and the code the host selected.
pub struct ScriptVm {
    script: Box<Script>,
    pub runs: Cell<usize>,
}

impl ScriptVm {
    pub fn new(
        script: impl Fn(&mut dyn HostInterface, &CallMessage, &[u8]) -> ExecutionResult + 'static,
    ) -> Self {
        ScriptVm {
            script: Box::new(script),
            runs: Cell::new(0),
        }
    }
}

impl fmt::Debug for ScriptVm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptVm").field("runs", &self.runs.get()).finish()
    }
}

impl Vm for ScriptVm {
    fn name(&self) -> &str {
        "script_vm"
    }

    fn version(&self) -> &str {
        "0.0.0"
    }

    fn execute(
        &self,
        host: &mut dyn HostInterface,
        _revision: Revision,
        message: &[u8],
        code: &[u8],
    ) -> [u8; RESULT_SIZE] {
        self.runs.set(self.runs.get() + 1);
        let (msg, _input) = CallMessage::unpack(message).expect("host sends valid messages");
        (self.script)(host, &msg, code).encode()
    }
}

pub fn to_address(seed: u8) -> Address {
    Address([seed; 20])
}

/// Sends a nested call from inside a script and decodes the reply.
pub fn call_child(host: &mut dyn HostInterface, msg: &CallMessage, input: &[u8]) -> ExecutionResult {
    let packed = msg.pack(input).expect("input fits");
    ExecutionResult::decode(&host.call(&packed)).expect("host replies with a known status")
}
