use std::fmt::Debug;

use types::{Address, Bytes32};

use crate::account::AccountRecord;

/// Base world state as it stood before the pending call.
///
/// The host never writes pending changes here; those live in frame diffs. The one
/// exception is [`AccountStore::create_account`], which self-destruction uses to
/// materialize an unknown beneficiary.
pub trait AccountStore: Debug {
    fn lookup(&self, address: &Address) -> Option<AccountRecord>;

    /// Code of the account, empty when it has none or does not exist.
    fn code(&self, address: &Address) -> &[u8];

    /// Storage slot value, zero when unset or when the account does not exist.
    fn storage(&self, address: &Address, key: &Bytes32) -> Bytes32;

    /// Creates a zero-balance, codeless, storage-less account if none exists.
    /// Returns `true` when a record was created.
    fn create_account(&mut self, address: &Address) -> bool;

    fn exists(&self, address: &Address) -> bool {
        self.lookup(address).is_some()
    }
}
