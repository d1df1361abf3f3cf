use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use types::{Address, Bytes32, LogEntry};

/// Pending storage changes of one account within one frame.
///
/// Every key in `storage` is also in `storage_written`. A written key missing from
/// `storage` was set to zero, which is how a deletion survives a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountDiff {
    pub storage: BTreeMap<Bytes32, Bytes32>,
    pub storage_written: BTreeSet<Bytes32>,
}

impl AccountDiff {
    /// The value this diff dictates for `key`, or `None` when it never wrote it.
    pub fn lookup(&self, key: &Bytes32) -> Option<Bytes32> {
        match self.storage.get(key) {
            Some(value) => Some(*value),
            None if self.storage_written.contains(key) => Some(Bytes32::ZERO),
            None => None,
        }
    }

    pub fn merge(&mut self, child: AccountDiff) {
        let AccountDiff {
            storage,
            storage_written,
        } = child;
        for key in storage_written {
            match storage.get(&key) {
                Some(value) => {
                    self.storage.insert(key, *value);
                }
                None => {
                    self.storage.remove(&key);
                }
            }
            self.storage_written.insert(key);
        }
    }
}

/// Signed balance deltas per address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceDiff {
    pub deltas: BTreeMap<Address, i128>,
}

impl BalanceDiff {
    pub fn credit(&mut self, address: Address, amount: i128) {
        let delta = self.deltas.entry(address).or_insert(0);
        *delta = delta.saturating_add(amount);
    }

    pub fn delta(&self, address: &Address) -> Option<i128> {
        self.deltas.get(address).copied()
    }

    pub fn merge(&mut self, child: BalanceDiff) {
        for (address, amount) in child.deltas {
            self.credit(address, amount);
        }
    }
}

/// Accounts registered for destruction, each with its beneficiary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestroyedSet {
    pub entries: BTreeMap<Address, Address>,
}

impl DestroyedSet {
    /// Returns `true` if `address` was not registered yet. A repeat only moves the
    /// beneficiary.
    pub fn insert(&mut self, address: Address, beneficiary: Address) -> bool {
        self.entries.insert(address, beneficiary).is_none()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.entries.contains_key(address)
    }

    pub fn merge(&mut self, child: DestroyedSet) {
        self.entries.extend(child.entries);
    }
}

/// Everything one frame changed, pending a merge into its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameDiff {
    pub accounts: BTreeMap<Address, AccountDiff>,
    pub balances: BalanceDiff,
    pub destroyed: DestroyedSet,
    pub logs: Vec<LogEntry>,
    pub warm_accounts: BTreeSet<Address>,
    pub warm_slots: BTreeSet<(Address, Bytes32)>,
}

impl FrameDiff {
    /// Folds a finished child into this frame. Child storage wins per key, balance
    /// deltas add up and child logs go after the ones already here.
    pub fn merge(&mut self, child: FrameDiff) {
        for (address, account) in child.accounts {
            self.accounts.entry(address).or_default().merge(account);
        }
        self.balances.merge(child.balances);
        self.destroyed.merge(child.destroyed);
        self.logs.extend(child.logs);
        self.warm_accounts.extend(child.warm_accounts);
        self.warm_slots.extend(child.warm_slots);
    }

    /// Whether this frame touched `address` through storage or balance.
    pub fn tracks(&self, address: &Address) -> bool {
        self.accounts.contains_key(address) || self.balances.deltas.contains_key(address)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.balances.deltas.is_empty()
            && self.destroyed.entries.is_empty()
            && self.logs.is_empty()
    }
}

impl fmt::Display for FrameDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Storage:")?;
        for (address, account) in &self.accounts {
            writeln!(f, "  {}", address)?;
            for key in &account.storage_written {
                match account.storage.get(key) {
                    Some(value) => writeln!(f, "    {} = {}", key, value)?,
                    None => writeln!(f, "    {} deleted", key)?,
                }
            }
        }
        writeln!(f, "Balances:")?;
        for (address, delta) in &self.balances.deltas {
            writeln!(f, "  {} {:+}", address, delta)?;
        }
        writeln!(f, "Destroyed:")?;
        for (address, beneficiary) in &self.destroyed.entries {
            writeln!(f, "  {} -> {}", address, beneficiary)?;
        }
        writeln!(f, "Logs:")?;
        for (i, log) in self.logs.iter().enumerate() {
            writeln!(f, "  [{}] {}", i, log)?;
        }
        Ok(())
    }
}
