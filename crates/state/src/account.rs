use std::collections::BTreeMap;

use types::Bytes32;

use crate::hash::{keccak256, EMPTY_CODE_HASH, EMPTY_STORAGE_ROOT};

/// An account as held by the in-memory store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub nonce: u64,
    pub balance: u128,
    pub code: Vec<u8>,

    /// Non-zero slots only.
    pub storage: BTreeMap<Bytes32, Bytes32>,
}

impl Account {
    pub fn with_balance(balance: u128) -> Self {
        Account {
            balance,
            ..Default::default()
        }
    }

    pub fn with_code(code: Vec<u8>) -> Self {
        Account {
            code,
            ..Default::default()
        }
    }

    pub fn code_hash(&self) -> Bytes32 {
        if self.code.is_empty() {
            EMPTY_CODE_HASH
        } else {
            keccak256(&self.code)
        }
    }

    /// Flat keccak commitment over the sorted slots. Not a Merkle-Patricia root;
    /// only the empty case matches the trie constant.
    pub fn storage_root(&self) -> Bytes32 {
        if self.storage.is_empty() {
            return EMPTY_STORAGE_ROOT;
        }
        let mut preimage = Vec::with_capacity(self.storage.len() * 64);
        for (key, value) in &self.storage {
            preimage.extend_from_slice(key.as_bytes());
            preimage.extend_from_slice(value.as_bytes());
        }
        keccak256(preimage)
    }

    pub fn record(&self) -> AccountRecord {
        AccountRecord {
            balance: self.balance,
            nonce: self.nonce,
            code_hash: self.code_hash(),
            storage_root: self.storage_root(),
        }
    }
}

/// What the store reports about an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountRecord {
    pub balance: u128,
    pub nonce: u64,
    pub code_hash: Bytes32,
    pub storage_root: Bytes32,
}
