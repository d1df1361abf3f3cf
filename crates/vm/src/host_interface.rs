use std::fmt::Debug;

use types::{
    AccessStatus, Address, BridgeResult, Bytes32, StorageStatus, RESULT_SIZE, TX_CONTEXT_SIZE,
};

/// Callback table the host exposes to a running VM.
///
/// Every call is answered against the frame of the VM invocation that issued it. Byte
/// slices handed back (`get_balance`, `get_code`) live in that frame's scratch buffers and
/// stay valid until the next callback.
pub trait HostInterface: Debug {
    fn account_exists(&mut self, address: &Address) -> bool;

    /// Marks the account warm, returning its status before the access.
    fn access_account(&mut self, address: &Address) -> AccessStatus;

    /// Marks the slot warm, returning its status before the access.
    fn access_storage(&mut self, address: &Address, key: &Bytes32) -> AccessStatus;

    fn get_storage(&mut self, address: &Address, key: &Bytes32) -> Bytes32;

    fn set_storage(&mut self, address: &Address, key: &Bytes32, value: &Bytes32)
        -> StorageStatus;

    /// Big-endian 32-byte balance, or an empty slice when the account is unknown.
    fn get_balance(&mut self, address: &Address) -> &[u8];

    fn get_code_size(&mut self, address: &Address) -> usize;

    fn get_code_hash(&mut self, address: &Address) -> Bytes32;

    fn get_code(&mut self, address: &Address) -> &[u8];

    /// Returns `true` when `address` was not already registered for destruction.
    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) -> bool;

    /// Runs a nested call. `message` is a packed call message; the reply is an encoded
    /// execution result.
    fn call(&mut self, message: &[u8]) -> [u8; RESULT_SIZE];

    fn get_tx_context(&mut self) -> [u8; TX_CONTEXT_SIZE];

    fn get_block_hash(&mut self, number: i64) -> Bytes32;

    fn emit_log(&mut self, address: &Address, data: &[u8], topics: &[Bytes32])
        -> BridgeResult<()>;
}
