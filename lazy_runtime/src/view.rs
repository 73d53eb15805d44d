/* Cursor views for zero-copy accessors.
   A view pairs the backing buffer with the address of the value being read;
   every read is relative to that address, bounds checked and little-endian. */

use crate::decode::Decode;
use crate::error::DecodeError;
use std::fmt;

/* Width of the address slot used by every indirect kind */
pub const POINTER_SIZE: usize = 4;

/* Placement of the tag inside an abstract type's body; the variant follows it */
pub const DISCRIMINANT_OFFSET: usize = 0;
pub const DISCRIMINANT_SIZE: usize = 4;

#[derive(Clone, Copy)]
pub struct View<'a> {
    buf: &'a [u8],
    address: usize,
}

impl<'a> View<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, address: 0 }
    }

    /* View positioned at an absolute address of the same buffer */
    pub fn at(buf: &'a [u8], address: usize) -> Result<Self, DecodeError> {
        View::new(buf).seek(address)
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /* Advance the cursor; landing exactly on the end is allowed for empty values */
    pub fn seek(&self, offset: usize) -> Result<Self, DecodeError> {
        let address = self.address.checked_add(offset).ok_or_else(|| self.out_of_bounds(offset, 0))?;
        if address > self.buf.len() {
            return Err(self.out_of_bounds(offset, 0));
        }
        Ok(Self { buf: self.buf, address })
    }

    /* Follow the address slot at `offset` to the body it points at */
    pub fn pointer(&self, offset: usize) -> Result<Self, DecodeError> {
        let target = self.read_u32(offset)? as usize;
        View::at(self.buf, target)
    }

    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], DecodeError> {
        let start = self
            .address
            .checked_add(offset)
            .ok_or_else(|| self.out_of_bounds(offset, len))?;
        let end = start.checked_add(len).ok_or_else(|| self.out_of_bounds(offset, len))?;
        if end > self.buf.len() {
            return Err(self.out_of_bounds(offset, len));
        }
        Ok(&self.buf[start..end])
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(offset, N)?);
        Ok(out)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        Ok(self.bytes(offset, 1)?[0])
    }

    pub fn read_bool(&self, offset: usize) -> Result<bool, DecodeError> {
        Ok(self.read_u8(offset)? != 0)
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.array(offset)?))
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.array(offset)?))
    }

    pub fn read_u64(&self, offset: usize) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.array(offset)?))
    }

    pub fn read_i64(&self, offset: usize) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.array(offset)?))
    }

    pub fn read_char(&self, offset: usize) -> Result<char, DecodeError> {
        let value = self.read_u32(offset)?;
        char::from_u32(value).ok_or(DecodeError::InvalidChar {
            value,
            address: self.address.saturating_add(offset),
        })
    }

    /* String body: u32 byte length followed by UTF-8 bytes */
    pub fn read_str(&self, offset: usize) -> Result<&'a str, DecodeError> {
        let len = self.read_u32(offset)? as usize;
        let bytes = self.bytes(offset + 4, len)?;
        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
            address: self.address.saturating_add(offset),
        })
    }

    /* Decode any nested value whose slot starts at `offset` */
    pub fn decode<T: Decode<'a>>(&self, offset: usize) -> Result<T, DecodeError> {
        T::decode(*self, offset)
    }

    fn out_of_bounds(&self, offset: usize, len: usize) -> DecodeError {
        DecodeError::OutOfBounds {
            address: self.address.saturating_add(offset),
            len,
            buffer_len: self.buf.len(),
        }
    }
}

/* The buffer itself is left out; it can be large and is rarely useful in a log line */
impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("address", &self.address)
            .field("buffer_len", &self.buf.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_reads_little_endian() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let view = View::new(&data);
        assert_eq!(view.read_u32(0).unwrap(), 0x04030201);
        assert_eq!(view.read_u64(0).unwrap(), 0x0807060504030201);
        assert_eq!(view.read_i32(4).unwrap(), i32::from_le_bytes([5, 6, 7, 8]));
        assert!(view.read_bool(0).unwrap());
        assert!(view.read_u32(5).is_err());
    }

    #[test]
    fn view_seek_is_relative_and_bounded() {
        let data = [0u8, 0, 9, 0, 0, 0];
        let view = View::new(&data).seek(2).unwrap();
        assert_eq!(view.address(), 2);
        assert_eq!(view.read_u32(0).unwrap(), 9);
        assert_eq!(view.seek(4).unwrap().address(), 6);
        assert_eq!(
            view.seek(5).unwrap_err(),
            DecodeError::OutOfBounds { address: 7, len: 0, buffer_len: 6 }
        );
    }

    #[test]
    fn view_pointer_is_absolute() {
        /* slot at 4 points to address 8, independent of the current cursor */
        let mut data = vec![0u8; 12];
        data[4..8].copy_from_slice(&8u32.to_le_bytes());
        data[8..12].copy_from_slice(&77u32.to_le_bytes());
        let view = View::at(&data, 4).unwrap();
        let body = view.pointer(0).unwrap();
        assert_eq!(body.address(), 8);
        assert_eq!(body.read_u32(0).unwrap(), 77);
    }

    #[test]
    fn view_reads_strings_and_chars() {
        let mut data = Vec::new();
        data.extend_from_slice(&5u32.to_le_bytes());
        data.extend_from_slice(b"hello");
        data.extend_from_slice(&('λ' as u32).to_le_bytes());
        data.extend_from_slice(&0xD800u32.to_le_bytes());
        let view = View::new(&data);
        assert_eq!(view.read_str(0).unwrap(), "hello");
        assert_eq!(view.read_char(9).unwrap(), 'λ');
        assert_eq!(
            view.read_char(13).unwrap_err(),
            DecodeError::InvalidChar { value: 0xD800, address: 13 }
        );
    }

    #[test]
    fn view_rejects_truncated_and_invalid_strings() {
        let mut data = Vec::new();
        data.extend_from_slice(&10u32.to_le_bytes());
        data.extend_from_slice(b"abc");
        assert!(matches!(
            View::new(&data).read_str(0),
            Err(DecodeError::OutOfBounds { .. })
        ));

        let mut bad = Vec::new();
        bad.extend_from_slice(&2u32.to_le_bytes());
        bad.extend_from_slice(&[0xff, 0xfe]);
        assert_eq!(
            View::new(&bad).read_str(0).unwrap_err(),
            DecodeError::InvalidUtf8 { address: 0 }
        );
    }
}
