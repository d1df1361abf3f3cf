use std::collections::HashMap;
use std::fmt;

use types::{Address, Bytes32};

use crate::account::{Account, AccountRecord};
use crate::store::AccountStore;

/// In-memory account store.
///
/// Accounts are keyed by address in a `HashMap`; a production client would put a
/// trie-backed database behind [`AccountStore`] instead.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub accounts: HashMap<Address, Account>,
}

impl State {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    pub fn get_account(&self, addr: &Address) -> Option<&Account> {
        self.accounts.get(addr)
    }

    /// Returns the account, creating an empty one first if needed.
    pub fn get_account_mut(&mut self, addr: &Address) -> &mut Account {
        self.accounts.entry(*addr).or_default()
    }

    pub fn deploy_contract(&mut self, addr: Address, code: Vec<u8>) {
        self.get_account_mut(&addr).code = code;
    }

    pub fn set_balance(&mut self, addr: Address, balance: u128) {
        self.get_account_mut(&addr).balance = balance;
    }

    /// Writes a base slot; zero clears it.
    pub fn set_storage(&mut self, addr: Address, key: Bytes32, value: Bytes32) {
        let account = self.get_account_mut(&addr);
        if value.is_zero() {
            account.storage.remove(&key);
        } else {
            account.storage.insert(key, value);
        }
    }
}

impl AccountStore for State {
    fn lookup(&self, address: &Address) -> Option<AccountRecord> {
        self.accounts.get(address).map(Account::record)
    }

    fn code(&self, address: &Address) -> &[u8] {
        self.accounts
            .get(address)
            .map(|account| account.code.as_slice())
            .unwrap_or(&[])
    }

    fn storage(&self, address: &Address, key: &Bytes32) -> Bytes32 {
        self.accounts
            .get(address)
            .and_then(|account| account.storage.get(key).copied())
            .unwrap_or(Bytes32::ZERO)
    }

    fn create_account(&mut self, address: &Address) -> bool {
        if self.accounts.contains_key(address) {
            return false;
        }
        tracing::debug!(target: "state", event = "account_created", address = %address);
        self.accounts.insert(*address, Account::default());
        true
    }

    fn exists(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- State Dump ---")?;
        let mut addresses: Vec<&Address> = self.accounts.keys().collect();
        addresses.sort();
        for addr in addresses {
            let acc = &self.accounts[addr];
            writeln!(f, "  Address: 0x{}", addr)?;
            writeln!(f, "      - Balance: {}", acc.balance)?;
            writeln!(f, "      - Nonce: {}", acc.nonce)?;
            writeln!(f, "      - Code size: {} bytes", acc.code.len())?;
            writeln!(f, "      - Storage:")?;
            for (key, value) in &acc.storage {
                writeln!(f, "          {} = {}", key, value)?;
            }
        }
        write!(f, "--------------------")
    }
}
