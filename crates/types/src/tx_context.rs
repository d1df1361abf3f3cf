use crate::address::Address;
use crate::bytes32::Bytes32;
use crate::error::{BridgeError, BridgeResult};
use crate::primitives::WireField;

/// Size of the encoded transaction/block context.
pub const TX_CONTEXT_SIZE: usize = 160;

/// Transaction and block data exposed to the VM.
///
/// One snapshot is taken per top-level execution; every nested frame reads the
/// same value and it never takes part in a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxContext {
    pub gas_price: Bytes32,
    pub origin: Address,
    pub coinbase: Address,
    pub block_number: i64,
    pub timestamp: i64,
    pub gas_limit: i64,
    pub difficulty: Bytes32,
    pub chain_id: Bytes32,
}

impl TxContext {
    pub fn encode(&self) -> [u8; TX_CONTEXT_SIZE] {
        let mut buf = [0u8; TX_CONTEXT_SIZE];
        let mut offset = 0;
        self.gas_price.write_field(&mut buf, &mut offset);
        self.origin.write_field(&mut buf, &mut offset);
        self.coinbase.write_field(&mut buf, &mut offset);
        self.block_number.write_field(&mut buf, &mut offset);
        self.timestamp.write_field(&mut buf, &mut offset);
        self.gas_limit.write_field(&mut buf, &mut offset);
        self.difficulty.write_field(&mut buf, &mut offset);
        self.chain_id.write_field(&mut buf, &mut offset);
        debug_assert_eq!(offset, TX_CONTEXT_SIZE);
        buf
    }

    pub fn decode(buf: &[u8]) -> BridgeResult<Self> {
        if buf.len() < TX_CONTEXT_SIZE {
            return Err(BridgeError::format("tx context", TX_CONTEXT_SIZE, buf.len()));
        }
        let mut offset = 0;
        Ok(TxContext {
            gas_price: Bytes32::read_field(buf, &mut offset)?,
            origin: Address::read_field(buf, &mut offset)?,
            coinbase: Address::read_field(buf, &mut offset)?,
            block_number: i64::read_field(buf, &mut offset)?,
            timestamp: i64::read_field(buf, &mut offset)?,
            gas_limit: i64::read_field(buf, &mut offset)?,
            difficulty: Bytes32::read_field(buf, &mut offset)?,
            chain_id: Bytes32::read_field(buf, &mut offset)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_fields_follow_the_addresses() {
        let ctx = TxContext {
            gas_price: Bytes32::from_u64(20),
            origin: Address([1; 20]),
            coinbase: Address([2; 20]),
            block_number: 1_234_567,
            timestamp: 1_600_000_000,
            gas_limit: 8_000_000,
            difficulty: Bytes32::from_u64(131_072),
            chain_id: Bytes32::from_u64(1),
        };
        let buf = ctx.encode();
        assert_eq!(&buf[72..80], &1_234_567i64.to_ne_bytes());
        assert_eq!(&buf[80..88], &1_600_000_000i64.to_ne_bytes());
        assert_eq!(&buf[88..96], &8_000_000i64.to_ne_bytes());
        assert_eq!(TxContext::decode(&buf), Ok(ctx));
    }
}
