use core::fmt;

use crate::address::Address;
use crate::bytes32::Bytes32;
use crate::error::{BridgeError, BridgeResult};

/// Highest number of topics a log may carry.
pub const MAX_TOPICS: usize = 4;

/// A log emitted by a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub address: Address,
    pub data: Vec<u8>,
    pub topics: Vec<Bytes32>,
}

impl LogEntry {
    /// Rejects more than [`MAX_TOPICS`] topics rather than dropping the extras.
    pub fn new(address: Address, data: &[u8], topics: &[Bytes32]) -> BridgeResult<Self> {
        if topics.len() > MAX_TOPICS {
            return Err(BridgeError::CapabilityViolation(format!(
                "log with {} topics, at most {} allowed",
                topics.len(),
                MAX_TOPICS
            )));
        }
        Ok(LogEntry {
            address,
            data: data.to_vec(),
            topics: topics.to_vec(),
        })
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} data=0x{}", self.address, hex::encode(&self.data))?;
        for (i, topic) in self.topics.iter().enumerate() {
            write!(f, " t{}={}", i, topic)?;
        }
        Ok(())
    }
}
