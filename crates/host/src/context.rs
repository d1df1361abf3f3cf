use state::AccountStore;
use types::{Address, Bytes32, CallMessage};

use crate::diff::FrameDiff;
use crate::scratch::ScratchBuffers;

/// State of one call frame: the message it runs, what it changed so far and the
/// buffers it lent to the VM.
#[derive(Debug)]
pub struct HostContext {
    pub depth: u32,
    pub message: CallMessage,
    pub diff: FrameDiff,
    scratch: ScratchBuffers,
}

impl HostContext {
    pub fn new(message: CallMessage) -> Self {
        Self {
            depth: message.depth,
            message,
            diff: FrameDiff::default(),
            scratch: ScratchBuffers::new(),
        }
    }

    pub fn scratch(&self) -> &ScratchBuffers {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut ScratchBuffers {
        &mut self.scratch
    }

    /// Ends the frame, releasing its scratch buffers.
    pub fn into_diff(self) -> FrameDiff {
        self.diff
    }
}

/// Frames of the running call chain, root first.
///
/// Only the last frame is written to; reads walk from it towards the root and fall
/// back to the store.
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<HostContext>,
}

impl CallStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, frame: HostContext) {
        self.frames.push(frame);
    }

    /// Drops every frame at index `len` and above, returning the one at `len`.
    pub fn unwind_to(&mut self, len: usize) -> Option<HostContext> {
        if self.frames.len() <= len {
            return None;
        }
        self.frames.drain(len..).next()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current(&self) -> Option<&HostContext> {
        self.frames.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut HostContext> {
        self.frames.last_mut()
    }

    /// Frames from the current one back to the root.
    pub fn visible(&self) -> impl Iterator<Item = &HostContext> {
        self.frames.iter().rev()
    }

    fn ancestors(&self) -> impl Iterator<Item = &HostContext> {
        self.visible().skip(1)
    }

    pub fn scratch_bytes(&self) -> usize {
        self.frames.iter().map(|frame| frame.scratch().bytes()).sum()
    }

    /// Storage value as the current frame sees it.
    pub fn storage_value<S: AccountStore + ?Sized>(
        &self,
        store: &S,
        address: &Address,
        key: &Bytes32,
    ) -> Bytes32 {
        self.visible()
            .filter_map(|frame| frame.diff.accounts.get(address))
            .find_map(|account| account.lookup(key))
            .unwrap_or_else(|| store.storage(address, key))
    }

    /// Sum of the balance deltas along the chain.
    pub fn balance_delta(&self, address: &Address) -> i128 {
        self.visible()
            .filter_map(|frame| frame.diff.balances.delta(address))
            .fold(0i128, i128::saturating_add)
    }

    pub fn tracks(&self, address: &Address) -> bool {
        self.visible().any(|frame| frame.diff.tracks(address))
    }

    /// Like [`CallStack::tracks`], ignoring the current frame.
    pub fn ancestors_track(&self, address: &Address) -> bool {
        self.ancestors().any(|frame| frame.diff.tracks(address))
    }

    pub fn is_destroyed(&self, address: &Address) -> bool {
        self.visible()
            .any(|frame| frame.diff.destroyed.contains(address))
    }

    pub fn is_warm_account(&self, address: &Address) -> bool {
        self.visible()
            .any(|frame| frame.diff.warm_accounts.contains(address))
    }

    pub fn is_warm_slot(&self, address: &Address, key: &Bytes32) -> bool {
        self.visible()
            .any(|frame| frame.diff.warm_slots.contains(&(*address, *key)))
    }
}
