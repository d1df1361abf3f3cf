use state::AccountStore;
use types::{
    AccessStatus, Address, BridgeResult, Bytes32, ExecutionResult, LogEntry,
    StorageStatus, RESULT_SIZE, TX_CONTEXT_SIZE,
};
use vm::HostInterface;

use crate::host::Host;

impl<'v, S: AccountStore> HostInterface for Host<'v, S> {
    fn account_exists(&mut self, address: &Address) -> bool {
        let exists = self.store.exists(address) || self.frames.tracks(address);
        tracing::trace!(target: "host", event = "account_exists", %address, exists);
        exists
    }

    fn access_account(&mut self, address: &Address) -> AccessStatus {
        let status = if self.frames.is_warm_account(address) {
            AccessStatus::Warm
        } else {
            AccessStatus::Cold
        };
        if let Some(frame) = self.frames.current_mut() {
            frame.diff.warm_accounts.insert(*address);
        }
        tracing::trace!(target: "host", event = "access_account", %address, ?status);
        status
    }

    fn access_storage(&mut self, address: &Address, key: &Bytes32) -> AccessStatus {
        let status = if self.frames.is_warm_slot(address, key) {
            AccessStatus::Warm
        } else {
            AccessStatus::Cold
        };
        if let Some(frame) = self.frames.current_mut() {
            frame.diff.warm_slots.insert((*address, *key));
        }
        tracing::trace!(target: "host", event = "access_storage", %address, %key, ?status);
        status
    }

    fn get_storage(&mut self, address: &Address, key: &Bytes32) -> Bytes32 {
        let value = self.frames.storage_value(&self.store, address, key);
        tracing::trace!(target: "host", event = "get_storage", %address, %key, %value);
        value
    }

    fn set_storage(
        &mut self,
        address: &Address,
        key: &Bytes32,
        value: &Bytes32,
    ) -> StorageStatus {
        let old = self.frames.storage_value(&self.store, address, key);
        let touched_here = self
            .frames
            .current()
            .is_some_and(|frame| frame.diff.accounts.contains_key(address));
        let account_is_new = !touched_here
            && !self.store.exists(address)
            && !self.frames.ancestors_track(address);

        let Some(frame) = self.frames.current_mut() else {
            return StorageStatus::Unchanged;
        };
        let account = frame.diff.accounts.entry(*address).or_default();
        let written_before = !account.storage_written.insert(*key);

        let status = if value.is_zero() {
            account.storage.remove(key);
            StorageStatus::Deleted
        } else {
            account.storage.insert(*key, *value);
            if *value == old {
                StorageStatus::Unchanged
            } else if account_is_new || old.is_zero() {
                StorageStatus::Added
            } else if written_before {
                StorageStatus::ModifiedAgain
            } else {
                StorageStatus::Modified
            }
        };
        tracing::trace!(
            target: "host",
            event = "set_storage",
            %address,
            %key,
            %old,
            %value,
            ?status,
        );
        status
    }

    fn get_balance(&mut self, address: &Address) -> &[u8] {
        let base = self.store.lookup(address).map(|record| record.balance);
        if base.is_none() && !self.frames.tracks(address) {
            tracing::trace!(target: "host", event = "get_balance", %address, known = false);
            return &[];
        }
        let base = i128::try_from(base.unwrap_or(0)).unwrap_or(i128::MAX);
        let balance = base.saturating_add(self.frames.balance_delta(address)).max(0) as u128;
        tracing::trace!(target: "host", event = "get_balance", %address, balance);

        match self.frames.current_mut() {
            Some(frame) => frame
                .scratch_mut()
                .alloc(Bytes32::from_u128(balance).as_bytes()),
            None => &[],
        }
    }

    fn get_code_size(&mut self, address: &Address) -> usize {
        self.store.code(address).len()
    }

    fn get_code_hash(&mut self, address: &Address) -> Bytes32 {
        self.store
            .lookup(address)
            .map(|record| record.code_hash)
            .unwrap_or(Bytes32::ZERO)
    }

    fn get_code(&mut self, address: &Address) -> &[u8] {
        let code = self.store.code(address);
        tracing::trace!(target: "host", event = "get_code", %address, size = code.len());
        match self.frames.current_mut() {
            Some(frame) => frame.scratch_mut().alloc(code),
            None => code,
        }
    }

    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) -> bool {
        let first = !self.frames.is_destroyed(address);
        if first && self.store.create_account(beneficiary) {
            tracing::debug!(target: "host", event = "beneficiary_created", %beneficiary);
        }
        let balance = self
            .store
            .lookup(address)
            .map(|record| record.balance)
            .unwrap_or(0);

        let Some(frame) = self.frames.current_mut() else {
            return false;
        };
        frame.diff.destroyed.insert(*address, *beneficiary);
        if first {
            let amount = i128::try_from(balance).unwrap_or(i128::MAX);
            frame.diff.balances.credit(*beneficiary, amount);
            frame.diff.balances.credit(*address, -amount);
        }
        tracing::debug!(
            target: "host",
            event = "selfdestruct",
            %address,
            %beneficiary,
            first,
            balance,
        );
        first
    }

    fn call(&mut self, message: &[u8]) -> [u8; RESULT_SIZE] {
        match self.dispatch(message) {
            Ok(outcome) => {
                let merged = outcome.result.is_success();
                if merged {
                    if let Some(frame) = self.frames.current_mut() {
                        frame.diff.merge(outcome.diff);
                    }
                }
                tracing::debug!(
                    target: "host",
                    event = "child_returned",
                    status = %outcome.result.status_code,
                    merged,
                );
                outcome.result.encode()
            }
            Err(error) => {
                let status = error.status_code();
                self.record_fault(error);
                ExecutionResult::failure(status).encode()
            }
        }
    }

    fn get_tx_context(&mut self) -> [u8; TX_CONTEXT_SIZE] {
        self.tx_context.encode()
    }

    fn get_block_hash(&mut self, number: i64) -> Bytes32 {
        let hash = self
            .block_hashes
            .get(&number)
            .copied()
            .unwrap_or(Bytes32::ZERO);
        tracing::trace!(target: "host", event = "get_block_hash", number, %hash);
        hash
    }

    fn emit_log(&mut self, address: &Address, data: &[u8], topics: &[Bytes32]) -> BridgeResult<()> {
        let entry = match LogEntry::new(*address, data, topics) {
            Ok(entry) => entry,
            Err(error) => {
                self.record_fault(error.clone());
                return Err(error);
            }
        };
        tracing::trace!(target: "host", event = "emit_log", %entry);
        if let Some(frame) = self.frames.current_mut() {
            frame.diff.logs.push(entry);
        }
        Ok(())
    }
}
