use types::{
    Address, Bytes32, CallKind, CallMessage, ExecutionResult, Revision, StatusCode, TxContext,
    RESULT_SIZE,
};

use crate::host_interface::HostInterface;
use crate::vm::Vm;

pub const STACK_LIMIT: usize = 1024;
pub const MEMORY_LIMIT: usize = 1024;

pub mod opcodes {
    pub const STOP: u8 = 0x00;
    pub const ADD: u8 = 0x01;
    pub const ADDRESS: u8 = 0x30;
    pub const BALANCE: u8 = 0x31;
    pub const CALLDATALOAD: u8 = 0x35;
    pub const NUMBER: u8 = 0x43;
    pub const MSTORE: u8 = 0x52;
    pub const SLOAD: u8 = 0x54;
    pub const SSTORE: u8 = 0x55;
    pub const MSIZE: u8 = 0x59;
    pub const PUSH1: u8 = 0x60;
    pub const PUSH32: u8 = 0x7f;
    pub const DUP1: u8 = 0x80;
    pub const LOG0: u8 = 0xa0;
    pub const LOG4: u8 = 0xa4;
    pub const CALL: u8 = 0xf1;
    pub const RETURN: u8 = 0xf3;
    pub const REVERT: u8 = 0xfd;
    pub const SELFDESTRUCT: u8 = 0xff;
}

/// Toy interpreter for a small EVM subset.
///
/// Arithmetic is 32-bit, every instruction costs one gas, and the machine talks to
/// the world only through [`HostInterface`]. Return data is not carried back; the
/// result buffer holds the status and remaining gas only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleVm;

impl ExampleVm {
    pub fn new() -> Self {
        ExampleVm
    }
}

impl Vm for ExampleVm {
    fn name(&self) -> &str {
        "example_vm"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn execute(
        &self,
        host: &mut dyn HostInterface,
        revision: Revision,
        message: &[u8],
        code: &[u8],
    ) -> [u8; RESULT_SIZE] {
        let (msg, input) = match CallMessage::unpack(message) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(target: "vm", event = "bad_message", error = %err);
                return ExecutionResult::failure(StatusCode::InternalError).encode();
            }
        };

        tracing::debug!(
            target: "vm",
            event = "execution_started",
            depth = msg.depth,
            destination = %msg.destination,
            code_size = code.len(),
            ?revision,
        );
        let result = Interpreter::new(host, revision, &msg, input).run(code);
        tracing::debug!(
            target: "vm",
            event = "execution_done",
            depth = msg.depth,
            status = %result.status_code,
            gas_left = result.gas_left,
        );
        result.encode()
    }
}

#[derive(Debug, Default)]
struct Stack {
    items: Vec<Bytes32>,
}

impl Stack {
    fn push(&mut self, value: Bytes32) -> Result<(), StatusCode> {
        if self.items.len() >= STACK_LIMIT {
            return Err(StatusCode::StackOverflow);
        }
        self.items.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<Bytes32, StatusCode> {
        self.items.pop().ok_or(StatusCode::StackUnderflow)
    }

    fn pop_u32(&mut self) -> Result<u32, StatusCode> {
        self.pop().map(|word| word.low_u32())
    }
}

#[derive(Debug)]
struct Memory {
    data: Vec<u8>,
    size: usize,
}

impl Memory {
    fn new() -> Self {
        Memory {
            data: vec![0u8; MEMORY_LIMIT],
            size: 0,
        }
    }

    /// Grows the active region to cover `offset..offset + len`. A zero-length region
    /// still grows it.
    fn expand(&mut self, offset: u32, len: u32) -> Result<&mut [u8], StatusCode> {
        let start = offset as usize;
        let end = start
            .checked_add(len as usize)
            .filter(|end| *end <= MEMORY_LIMIT)
            .ok_or(StatusCode::Failure)?;
        self.size = self.size.max(end);
        Ok(&mut self.data[start..end])
    }
}

fn word_from_u32(value: u32) -> Bytes32 {
    Bytes32::from_u64(value as u64)
}

enum Flow {
    Next,
    Halt(ExecutionResult),
}

struct Interpreter<'a> {
    host: &'a mut dyn HostInterface,
    revision: Revision,
    msg: &'a CallMessage,
    input: &'a [u8],
    gas_left: i64,
    stack: Stack,
    memory: Memory,
}

impl<'a> Interpreter<'a> {
    fn new(
        host: &'a mut dyn HostInterface,
        revision: Revision,
        msg: &'a CallMessage,
        input: &'a [u8],
    ) -> Self {
        Interpreter {
            host,
            revision,
            msg,
            input,
            gas_left: msg.gas,
            stack: Stack::default(),
            memory: Memory::new(),
        }
    }

    fn run(mut self, code: &[u8]) -> ExecutionResult {
        let mut pc = 0;
        while pc < code.len() {
            self.gas_left -= 1;
            if self.gas_left < 0 {
                return ExecutionResult::failure(StatusCode::OutOfGas);
            }
            match self.step(code, &mut pc) {
                Ok(Flow::Next) => pc += 1,
                Ok(Flow::Halt(result)) => return result,
                Err(status) => return ExecutionResult::failure(status),
            }
        }
        ExecutionResult::success(self.gas_left)
    }

    fn step(&mut self, code: &[u8], pc: &mut usize) -> Result<Flow, StatusCode> {
        use opcodes::*;

        let op = code[*pc];
        match op {
            STOP => return Ok(Flow::Halt(ExecutionResult::success(self.gas_left))),
            ADD => {
                let a = self.stack.pop_u32()?;
                let b = self.stack.pop_u32()?;
                self.stack.push(word_from_u32(a.wrapping_add(b)))?;
            }
            ADDRESS => self.stack.push(self.msg.destination.to_word())?,
            BALANCE => {
                let address = Address::from_word(&self.stack.pop()?);
                let balance = self.host.get_balance(&address);
                let word = if balance.is_empty() {
                    Bytes32::ZERO
                } else {
                    Bytes32::from_slice(balance).map_err(|_| StatusCode::InternalError)?
                };
                self.stack.push(word)?;
            }
            CALLDATALOAD => {
                let offset = self.stack.pop_u32()? as usize;
                let mut word = [0u8; 32];
                if offset < self.input.len() {
                    let len = (self.input.len() - offset).min(32);
                    word[..len].copy_from_slice(&self.input[offset..offset + len]);
                }
                self.stack.push(Bytes32(word))?;
            }
            NUMBER => {
                let tx = TxContext::decode(&self.host.get_tx_context())
                    .map_err(|_| StatusCode::InternalError)?;
                self.stack.push(word_from_u32(tx.block_number as u32))?;
            }
            MSTORE => {
                let offset = self.stack.pop_u32()?;
                let value = self.stack.pop()?;
                self.memory
                    .expand(offset, 32)?
                    .copy_from_slice(value.as_bytes());
            }
            SLOAD => {
                let key = self.stack.pop()?;
                let value = self.host.get_storage(&self.msg.destination, &key);
                self.stack.push(value)?;
            }
            SSTORE => {
                self.require_mutable()?;
                let key = self.stack.pop()?;
                let value = self.stack.pop()?;
                self.host.set_storage(&self.msg.destination, &key, &value);
            }
            MSIZE => self.stack.push(word_from_u32(self.memory.size as u32))?,
            PUSH1..=PUSH32 => {
                let n = (op - PUSH1 + 1) as usize;
                let start = (*pc + 1).min(code.len());
                let end = (*pc + 1 + n).min(code.len());
                let mut word = [0u8; 32];
                word[32 - n..32 - n + (end - start)].copy_from_slice(&code[start..end]);
                *pc += n;
                self.stack.push(Bytes32(word))?;
            }
            DUP1 => {
                let value = self.stack.pop()?;
                self.stack.push(value)?;
                self.stack.push(value)?;
            }
            LOG0..=LOG4 => {
                self.require_mutable()?;
                let offset = self.stack.pop_u32()?;
                let size = self.stack.pop_u32()?;
                let mut topics = Vec::with_capacity((op - LOG0) as usize);
                for _ in LOG0..op {
                    topics.push(self.stack.pop()?);
                }
                let data = self.memory.expand(offset, size)?.to_vec();
                self.host
                    .emit_log(&self.msg.destination, &data, &topics)
                    .map_err(|_| StatusCode::Failure)?;
            }
            CALL => self.call()?,
            RETURN => {
                let offset = self.stack.pop_u32()?;
                let size = self.stack.pop_u32()?;
                self.memory.expand(offset, size)?;
                return Ok(Flow::Halt(ExecutionResult::success(self.gas_left)));
            }
            REVERT => {
                if self.revision < Revision::Byzantium {
                    return Err(StatusCode::UndefinedInstruction);
                }
                let offset = self.stack.pop_u32()?;
                let size = self.stack.pop_u32()?;
                self.memory.expand(offset, size)?;
                return Ok(Flow::Halt(ExecutionResult::revert(self.gas_left)));
            }
            SELFDESTRUCT => {
                self.require_mutable()?;
                let beneficiary = Address::from_word(&self.stack.pop()?);
                self.host.selfdestruct(&self.msg.destination, &beneficiary);
                return Ok(Flow::Halt(ExecutionResult::success(self.gas_left)));
            }
            _ => return Err(StatusCode::UndefinedInstruction),
        }
        Ok(Flow::Next)
    }

    fn require_mutable(&self) -> Result<(), StatusCode> {
        if self.msg.is_static() {
            return Err(StatusCode::StaticModeViolation);
        }
        Ok(())
    }

    /// Stack: gas, address, value, input offset, input size, output offset, output size.
    fn call(&mut self) -> Result<(), StatusCode> {
        let gas = self.stack.pop_u32()?;
        let destination = Address::from_word(&self.stack.pop()?);
        let value = self.stack.pop()?;
        let input_offset = self.stack.pop_u32()?;
        let input_size = self.stack.pop_u32()?;
        let output_offset = self.stack.pop_u32()?;
        let output_size = self.stack.pop_u32()?;

        if self.msg.is_static() && !value.is_zero() {
            return Err(StatusCode::StaticModeViolation);
        }
        let input = self.memory.expand(input_offset, input_size)?.to_vec();
        self.memory.expand(output_offset, output_size)?;

        let call = CallMessage {
            kind: CallKind::Call,
            flags: self.msg.flags,
            depth: self.msg.depth.saturating_add(1),
            gas: gas as i64,
            destination,
            sender: self.msg.destination,
            input_offset: 0,
            input_size: 0,
            value,
            create2_salt: Bytes32::ZERO,
        };
        let packed = call.pack(&input).map_err(|_| StatusCode::Failure)?;
        let reply = self.host.call(&packed);
        let succeeded = ExecutionResult::decode(&reply)
            .map(|result| result.is_success())
            .unwrap_or(false);
        self.stack.push(word_from_u32(succeeded as u32))?;
        Ok(())
    }
}
