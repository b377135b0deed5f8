//! Sequential, bounds-checked reads over a record buffer.
//!
//! Multi-byte integers are assembled least-significant byte first. Floats
//! are filled into a scratch buffer in reverse stream order and then
//! reinterpreted as IEEE-754, mirroring the producer's writer byte for
//! byte; existing files depend on this exact layout.

use crate::error::{DecodeError, Result};

/// Sequential reader over a fixed byte buffer.
///
/// Every read advances an internal offset; reading past the end of the
/// buffer fails with [`DecodeError::UnexpectedEndOfData`]. The cursor never
/// rewinds.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current read position, for error reporting.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn byte(&mut self) -> Result<u8> {
        let b = *self
            .data
            .get(self.offset)
            .ok_or(DecodeError::UnexpectedEndOfData {
                offset: self.offset,
            })?;
        self.offset += 1;
        Ok(b)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.byte()
    }

    /// Reads one byte as a flag; any non-zero value is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.byte()? != 0)
    }

    /// Reads a little-endian signed integer of 8, 16, 32 or 64 bits.
    pub fn read_int(&mut self, bits: u32) -> Result<i64> {
        debug_assert!(matches!(bits, 8 | 16 | 32 | 64));
        let bytes = (bits / 8) as usize;
        let mut value: u64 = 0;
        for i in 0..bytes {
            value |= u64::from(self.byte()?) << (8 * i);
        }
        // sign-extend from the read width
        let shift = 64 - bits;
        Ok(((value << shift) as i64) >> shift)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_int(32)? as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_int(64)
    }

    /// Reads an IEEE-754 32-bit float via the reversed scratch buffer.
    pub fn read_f32(&mut self) -> Result<f32> {
        let mut scratch = [0u8; 4];
        for slot in scratch.iter_mut().rev() {
            *slot = self.byte()?;
        }
        Ok(f32::from_be_bytes(scratch))
    }

    /// Reads an IEEE-754 64-bit float, same scratch layout as
    /// [`ByteCursor::read_f32`].
    pub fn read_f64(&mut self) -> Result<f64> {
        let mut scratch = [0u8; 8];
        for slot in scratch.iter_mut().rev() {
            *slot = self.byte()?;
        }
        Ok(f64::from_be_bytes(scratch))
    }

    /// Reads a null-terminated byte string, one byte per character.
    pub fn read_string(&mut self) -> Result<String> {
        let mut s = String::new();
        loop {
            let b = self.byte()?;
            if b == 0 {
                return Ok(s);
            }
            s.push(char::from(b));
        }
    }

    /// Reads `dim` consecutive floats.
    pub fn read_vec(&mut self, dim: usize) -> Result<Vec<f32>> {
        let mut v = Vec::with_capacity(dim);
        for _ in 0..dim {
            v.push(self.read_f32()?);
        }
        Ok(v)
    }

    /// Reads `dim` consecutive 32-bit integers.
    pub fn read_int_vec(&mut self, dim: usize) -> Result<Vec<i32>> {
        let mut v = Vec::with_capacity(dim);
        for _ in 0..dim {
            v.push(self.read_i32()?);
        }
        Ok(v)
    }

    /// Reads a 32-bit length prefix followed by that many 32-bit integers.
    pub fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let offset = self.offset;
        let len = self.read_i32()?;
        if len < 0 {
            return Err(DecodeError::malformed(format!(
                "negative array length {len} at offset {offset}"
            )));
        }
        self.read_int_vec(len as usize)
    }
}
