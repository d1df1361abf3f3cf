use crate::address::Address;
use crate::bytes32::Bytes32;
use crate::error::{BridgeError, BridgeResult};
use crate::primitives::{skip_padding, write_padding, WireField};
use crate::status::{CallFlags, CallKind, CALL_FLAG_STATIC};

/// Size of the fixed message header on the wire.
///
/// | offset | width | field          |
/// |--------|-------|----------------|
/// | 0      | 4     | kind           |
/// | 4      | 4     | flags          |
/// | 8      | 4     | depth          |
/// | 12     | 4     | padding (zero) |
/// | 16     | 8     | gas            |
/// | 24     | 20    | destination    |
/// | 44     | 20    | sender         |
/// | 64     | 8     | input offset   |
/// | 72     | 4     | input size     |
/// | 76     | 32    | value          |
/// | 108    | 32    | create2 salt   |
pub const MESSAGE_SIZE: usize = 140;

/// A call request crossing the VM boundary.
///
/// The input bytes are not part of the header; `input_offset` and `input_size`
/// reference them inside the buffer the header travels in (see [`CallMessage::pack`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallMessage {
    pub kind: CallKind,
    pub flags: CallFlags,
    pub depth: u32,
    pub gas: i64,
    pub destination: Address,
    pub sender: Address,
    pub input_offset: u64,
    pub input_size: u32,
    /// Big-endian 256-bit value transferred with the call.
    pub value: Bytes32,
    pub create2_salt: Bytes32,
}

impl CallMessage {
    /// A plain depth-0 CALL with no value and no input.
    pub fn call(sender: Address, destination: Address, gas: i64) -> Self {
        CallMessage {
            kind: CallKind::Call,
            flags: 0,
            depth: 0,
            gas,
            destination,
            sender,
            input_offset: 0,
            input_size: 0,
            value: Bytes32::ZERO,
            create2_salt: Bytes32::ZERO,
        }
    }

    pub fn is_static(&self) -> bool {
        self.flags & CALL_FLAG_STATIC != 0
    }

    /// Same message, re-homed at another depth.
    pub fn at_depth(&self, depth: u32) -> Self {
        CallMessage { depth, ..*self }
    }

    pub fn encode(&self) -> [u8; MESSAGE_SIZE] {
        let mut buf = [0u8; MESSAGE_SIZE];
        let mut offset = 0;
        self.kind.as_i32().write_field(&mut buf, &mut offset);
        self.flags.write_field(&mut buf, &mut offset);
        self.depth.write_field(&mut buf, &mut offset);
        write_padding(&mut buf, &mut offset, 4);
        self.gas.write_field(&mut buf, &mut offset);
        self.destination.write_field(&mut buf, &mut offset);
        self.sender.write_field(&mut buf, &mut offset);
        self.input_offset.write_field(&mut buf, &mut offset);
        self.input_size.write_field(&mut buf, &mut offset);
        self.value.write_field(&mut buf, &mut offset);
        self.create2_salt.write_field(&mut buf, &mut offset);
        debug_assert_eq!(offset, MESSAGE_SIZE);
        buf
    }

    pub fn decode(buf: &[u8]) -> BridgeResult<Self> {
        if buf.len() < MESSAGE_SIZE {
            return Err(BridgeError::format("call message", MESSAGE_SIZE, buf.len()));
        }
        let mut offset = 0;
        let kind = CallKind::try_from(i32::read_field(buf, &mut offset)?)?;
        let flags = u32::read_field(buf, &mut offset)?;
        let depth = u32::read_field(buf, &mut offset)?;
        skip_padding(&mut offset, 4);
        let gas = i64::read_field(buf, &mut offset)?;
        let destination = Address::read_field(buf, &mut offset)?;
        let sender = Address::read_field(buf, &mut offset)?;
        let input_offset = u64::read_field(buf, &mut offset)?;
        let input_size = u32::read_field(buf, &mut offset)?;
        let value = Bytes32::read_field(buf, &mut offset)?;
        let create2_salt = Bytes32::read_field(buf, &mut offset)?;

        Ok(CallMessage {
            kind,
            flags,
            depth,
            gas,
            destination,
            sender,
            input_offset,
            input_size,
            value,
            create2_salt,
        })
    }

    /// Encodes the header followed by `input`, pointing the input reference at it.
    pub fn pack(&self, input: &[u8]) -> BridgeResult<Vec<u8>> {
        let input_size = u32::try_from(input.len()).map_err(|_| {
            BridgeError::CapabilityViolation(format!(
                "call input of {} bytes does not fit the message",
                input.len()
            ))
        })?;
        let header = CallMessage {
            input_offset: MESSAGE_SIZE as u64,
            input_size,
            ..*self
        };

        let mut out = Vec::with_capacity(MESSAGE_SIZE + input.len());
        out.extend_from_slice(&header.encode());
        out.extend_from_slice(input);
        Ok(out)
    }

    /// Decodes the header and resolves its input reference within `buf`.
    pub fn unpack(buf: &[u8]) -> BridgeResult<(Self, &[u8])> {
        let message = CallMessage::decode(buf)?;
        if message.input_size == 0 {
            return Ok((message, &[]));
        }
        let start = usize::try_from(message.input_offset)
            .map_err(|_| BridgeError::format("message input", usize::MAX, buf.len()))?;
        let end = start
            .checked_add(message.input_size as usize)
            .ok_or_else(|| BridgeError::format("message input", usize::MAX, buf.len()))?;
        let input = buf
            .get(start..end)
            .ok_or_else(|| BridgeError::format("message input", end, buf.len()))?;
        Ok((message, input))
    }
}
