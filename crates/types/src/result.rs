use crate::error::{BridgeError, BridgeResult};
use crate::primitives::{skip_padding, write_padding, WireField};
use crate::status::StatusCode;

/// Size of the result buffer the VM hands back.
///
/// `status_code: i32` at 0, four zero bytes, `gas_left: i64` at 8, and reserved
/// zero bytes up to 32. Both fields are always written at full width.
pub const RESULT_SIZE: usize = 32;

const STATUS_OFFSET: usize = 0;
const GAS_LEFT_OFFSET: usize = 8;

/// Outcome of one VM execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pub status_code: StatusCode,
    pub gas_left: i64,
}

impl ExecutionResult {
    pub fn new(status_code: StatusCode, gas_left: i64) -> Self {
        Self {
            status_code,
            gas_left,
        }
    }

    pub fn success(gas_left: i64) -> Self {
        Self::new(StatusCode::Success, gas_left)
    }

    pub fn revert(gas_left: i64) -> Self {
        Self::new(StatusCode::Revert, gas_left)
    }

    /// A failure status; gas is only returned on success or revert.
    pub fn failure(status_code: StatusCode) -> Self {
        Self::new(status_code, 0)
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    pub fn encode(&self) -> [u8; RESULT_SIZE] {
        let mut buf = [0u8; RESULT_SIZE];
        let mut offset = STATUS_OFFSET;
        self.status_code.as_i32().write_field(&mut buf, &mut offset);
        let gap = GAS_LEFT_OFFSET - offset;
        write_padding(&mut buf, &mut offset, gap);
        self.gas_left.write_field(&mut buf, &mut offset);
        let reserved = RESULT_SIZE - offset;
        write_padding(&mut buf, &mut offset, reserved);
        buf
    }

    pub fn decode(buf: &[u8]) -> BridgeResult<Self> {
        if buf.len() < RESULT_SIZE {
            return Err(BridgeError::format("execution result", RESULT_SIZE, buf.len()));
        }
        let mut offset = STATUS_OFFSET;
        let raw_status = i32::read_field(buf, &mut offset)?;
        let gap = GAS_LEFT_OFFSET - offset;
        skip_padding(&mut offset, gap);
        let gas_left = i64::read_field(buf, &mut offset)?;

        Ok(ExecutionResult {
            status_code: StatusCode::try_from(raw_status)?,
            gas_left,
        })
    }
}
