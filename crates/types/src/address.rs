use core::fmt;
use core::str::FromStr;

use crate::bytes32::{Bytes32, BYTES32_LEN};
use crate::error::{BridgeError, BridgeResult};

pub const ADDRESS_LEN: usize = 20;

/// 20-byte account address, kept as the raw big-endian byte string the VM sees.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> BridgeResult<Self> {
        if slice.len() < ADDRESS_LEN {
            return Err(BridgeError::format("address", ADDRESS_LEN, slice.len()));
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&slice[..ADDRESS_LEN]);
        Ok(Address::new(bytes))
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    /// Right-aligns the address in a 32-byte word, as it sits on the VM stack.
    pub fn to_word(&self) -> Bytes32 {
        let mut word = [0u8; BYTES32_LEN];
        word[BYTES32_LEN - ADDRESS_LEN..].copy_from_slice(&self.0);
        Bytes32(word)
    }

    /// Truncates a 32-byte word to its low 20 bytes.
    pub fn from_word(word: &Bytes32) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&word.0[BYTES32_LEN - ADDRESS_LEN..]);
        Address(bytes)
    }
}

impl FromStr for Address {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|_| BridgeError::format("address hex", ADDRESS_LEN * 2, digits.len()))?;
        if bytes.len() != ADDRESS_LEN {
            return Err(BridgeError::format("address", ADDRESS_LEN, bytes.len()));
        }
        Address::from_slice(&bytes)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
