use std::collections::BTreeMap;

use state::AccountStore;
use types::{BridgeError, BridgeResult, Bytes32, CallMessage, TxContext};
use vm::Vm;

use crate::config::HostConfig;
use crate::context::CallStack;
use crate::outcome::Execution;

/// Host side of the VM boundary.
///
/// Owns the base store, the transaction context and the frame arena of the running
/// call chain. The VM sees it only through [`vm::HostInterface`]; nested calls come
/// back in through [`Host::dispatch`] and recurse into the same VM.
#[derive(Debug)]
pub struct Host<'v, S: AccountStore> {
    pub(crate) store: S,
    pub(crate) vm: &'v dyn Vm,
    pub(crate) tx_context: TxContext,
    pub(crate) config: HostConfig,
    pub(crate) block_hashes: BTreeMap<i64, Bytes32>,
    pub(crate) frames: CallStack,
    fault: Option<BridgeError>,
}

impl<'v, S: AccountStore> Host<'v, S> {
    pub fn new(store: S, vm: &'v dyn Vm, tx_context: TxContext) -> Self {
        Self {
            store,
            vm,
            tx_context,
            config: HostConfig::default(),
            block_hashes: BTreeMap::new(),
            frames: CallStack::new(),
            fault: None,
        }
    }

    pub fn with_config(mut self, config: HostConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_block_hash(mut self, number: i64, hash: Bytes32) -> Self {
        self.block_hashes.insert(number, hash);
        self
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Live frames; zero outside of [`Host::execute`].
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Bytes currently lent to the VM across all live frames.
    pub fn scratch_bytes(&self) -> usize {
        self.frames.scratch_bytes()
    }

    /// Runs a top-level call and returns its result with the diffs of the root frame.
    ///
    /// CREATE and CREATE2 run `input` as init code; every other kind runs the
    /// destination's code. Faults raised inside callbacks are answered to the VM as
    /// failures, then the first one is returned here as `Err`.
    pub fn execute(&mut self, message: &CallMessage, input: &[u8]) -> BridgeResult<Execution> {
        self.fault = None;
        tracing::info!(
            target: "host",
            event = "execute",
            vm = self.vm.name(),
            kind = ?message.kind,
            destination = %message.destination,
            gas = message.gas,
            revision = ?self.config.revision,
        );

        let outcome = self.run_frame(*message, input);
        if let Some(fault) = self.fault.take() {
            tracing::warn!(target: "host", event = "execute_faulted", error = %fault);
            return Err(fault);
        }
        let outcome = outcome?;

        tracing::info!(
            target: "host",
            event = "executed",
            status = %outcome.result.status_code,
            gas_left = outcome.result.gas_left,
        );
        Ok(Execution::new(message.gas, outcome.result, outcome.diff))
    }

    /// Keeps the first fault of the running execution.
    pub(crate) fn record_fault(&mut self, error: BridgeError) {
        tracing::warn!(target: "host", event = "fault", error = %error);
        if self.fault.is_none() {
            self.fault = Some(error);
        }
    }
}
