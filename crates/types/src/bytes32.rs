use core::fmt;
use core::str::FromStr;

use crate::error::{BridgeError, BridgeResult};

pub const BYTES32_LEN: usize = 32;

/// A 32-byte big-endian word: storage keys and values, hashes, and 256-bit
/// quantities such as call value, gas price or chain id.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes32(pub [u8; BYTES32_LEN]);

impl Bytes32 {
    pub const ZERO: Bytes32 = Bytes32([0u8; BYTES32_LEN]);

    pub fn new(bytes: [u8; BYTES32_LEN]) -> Self {
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_u128(value as u128)
    }

    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; BYTES32_LEN];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Bytes32(bytes)
    }

    /// Returns the value when it fits in 128 bits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[..16].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[16..]);
        Some(u128::from_be_bytes(low))
    }

    /// The low 32 bits, ignoring everything above.
    pub fn low_u32(&self) -> u32 {
        let mut low = [0u8; 4];
        low.copy_from_slice(&self.0[28..]);
        u32::from_be_bytes(low)
    }

    /// Right-aligns up to 32 bytes into a word (big-endian number semantics).
    pub fn from_slice(slice: &[u8]) -> BridgeResult<Self> {
        if slice.len() > BYTES32_LEN {
            return Err(BridgeError::format("32-byte word", BYTES32_LEN, slice.len()));
        }
        let mut bytes = [0u8; BYTES32_LEN];
        bytes[BYTES32_LEN - slice.len()..].copy_from_slice(slice);
        Ok(Bytes32(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; BYTES32_LEN]> for Bytes32 {
    fn from(bytes: [u8; BYTES32_LEN]) -> Self {
        Bytes32(bytes)
    }
}

impl FromStr for Bytes32 {
    type Err = BridgeError;

    /// Parses hex, left-padding short inputs so `"0x2a"` reads as 42.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let padded = if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(&padded)
            .map_err(|_| BridgeError::format("word hex", BYTES32_LEN * 2, digits.len()))?;
        Bytes32::from_slice(&bytes)
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
