use crate::address::Address;
use crate::bytes32::Bytes32;
use crate::error::{BridgeError, BridgeResult};

/// A fixed-width field of the native wire layout.
///
/// Integers travel in the platform's native byte order, byte strings verbatim.
/// Every layout built from these fields is a plain sequence of writes at known
/// offsets, so encoders and decoders can be read side by side against the table
/// of offsets they implement.
pub trait WireField: Sized {
    const WIDTH: usize;

    /// Appends `self` into `buf` at `*offset`, advancing the offset.
    fn write_field(&self, buf: &mut [u8], offset: &mut usize);

    /// Reads a field at `*offset`, advancing the offset.
    fn read_field(buf: &[u8], offset: &mut usize) -> BridgeResult<Self>;
}

fn take<const N: usize>(buf: &[u8], offset: &mut usize) -> BridgeResult<[u8; N]> {
    let end = *offset + N;
    let slice = buf
        .get(*offset..end)
        .ok_or_else(|| BridgeError::format("field", end, buf.len()))?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    *offset = end;
    Ok(out)
}

fn put(bytes: &[u8], buf: &mut [u8], offset: &mut usize) {
    let end = *offset + bytes.len();
    if end <= buf.len() {
        buf[*offset..end].copy_from_slice(bytes);
        *offset = end;
    }
}

/// Zero-fills `len` padding bytes at `*offset`. Native readers may look at
/// padding, so it is never left as whatever the buffer held before.
pub fn write_padding(buf: &mut [u8], offset: &mut usize, len: usize) {
    let end = *offset + len;
    if end <= buf.len() {
        buf[*offset..end].fill(0);
        *offset = end;
    }
}

pub fn skip_padding(offset: &mut usize, len: usize) {
    *offset += len;
}

macro_rules! native_int_field {
    ($($ty:ty),*) => {
        $(
            impl WireField for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();

                fn write_field(&self, buf: &mut [u8], offset: &mut usize) {
                    put(&self.to_ne_bytes(), buf, offset);
                }

                fn read_field(buf: &[u8], offset: &mut usize) -> BridgeResult<Self> {
                    Ok(<$ty>::from_ne_bytes(take(buf, offset)?))
                }
            }
        )*
    };
}

native_int_field!(i32, u32, i64, u64);

impl<const N: usize> WireField for [u8; N] {
    const WIDTH: usize = N;

    fn write_field(&self, buf: &mut [u8], offset: &mut usize) {
        put(self, buf, offset);
    }

    fn read_field(buf: &[u8], offset: &mut usize) -> BridgeResult<Self> {
        take(buf, offset)
    }
}

impl WireField for Address {
    const WIDTH: usize = crate::ADDRESS_LEN;

    fn write_field(&self, buf: &mut [u8], offset: &mut usize) {
        self.0.write_field(buf, offset);
    }

    fn read_field(buf: &[u8], offset: &mut usize) -> BridgeResult<Self> {
        Ok(Address(take(buf, offset)?))
    }
}

impl WireField for Bytes32 {
    const WIDTH: usize = crate::BYTES32_LEN;

    fn write_field(&self, buf: &mut [u8], offset: &mut usize) {
        self.0.write_field(buf, offset);
    }

    fn read_field(buf: &[u8], offset: &mut usize) -> BridgeResult<Self> {
        Ok(Bytes32(take(buf, offset)?))
    }
}
