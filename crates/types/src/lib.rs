pub mod address;
pub use address::{Address, ADDRESS_LEN};

pub mod bytes32;
pub use bytes32::{Bytes32, BYTES32_LEN};

pub mod error;
pub use error::{BridgeError, BridgeResult};

// fixed-width wire fields
pub mod primitives;
pub use primitives::*;

pub mod status;
pub use status::*;

pub mod message;
pub use message::{CallMessage, MESSAGE_SIZE};

pub mod result;
pub use result::{ExecutionResult, RESULT_SIZE};

pub mod tx_context;
pub use tx_context::{TxContext, TX_CONTEXT_SIZE};

pub mod log;
pub use log::{LogEntry, MAX_TOPICS};
