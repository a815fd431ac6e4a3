//! The read cursor used by all of the TP-DU field decoders.
//!
//! A PDU arrives as one long hex string. Each field decoder takes the cursor, reads exactly as
//! many octets as its field occupies, and leaves the cursor positioned on the next field. The
//! cursor only ever moves forwards, and refuses to read past the end of the data (rather than
//! silently handing back a short read).
use crate::errors::*;
use crate::util::{HexData, check_hex, hex_value};

/// Forward-only cursor over a hex string. Positions are counted in hex digits, so one octet is
/// two positions.
#[derive(Debug, Clone)]
pub struct HexCursor<'a> {
    data: &'a str,
    pos: usize
}
impl<'a> HexCursor<'a> {
    /// Make a cursor over `data`, which must be an even-length string of hex digits (either
    /// case).
    pub fn new(data: &'a str) -> PduResult<Self> {
        check_hex(data)?;
        Ok(Self { data, pos: 0 })
    }
    /// Current position, in hex digits from the start.
    pub fn position(&self) -> usize {
        self.pos
    }
    /// Number of hex digits left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
    /// Read `digits` hex digits.
    pub fn read(&mut self, digits: usize) -> PduResult<&'a str> {
        if digits > self.remaining() {
            return Err(PduError::malformed(self.pos, "read past the end of the PDU"));
        }
        let ret = &self.data[self.pos..self.pos + digits];
        trace!("cursor: read {} digits at {}: {}", digits, self.pos, ret);
        self.pos += digits;
        Ok(ret)
    }
    /// Read `n` octets, as hex.
    pub fn read_octets(&mut self, n: usize) -> PduResult<&'a str> {
        self.read(n * 2)
    }
    /// Read a single octet.
    pub fn read_octet(&mut self) -> PduResult<u8> {
        let b = self.read(2)?.as_bytes();
        Ok((hex_value(b[0]) << 4) | hex_value(b[1]))
    }
    /// Read `n` octets, as bytes.
    pub fn read_bytes(&mut self, n: usize) -> PduResult<Vec<u8>> {
        HexData::decode(self.read_octets(n)?)
    }
    /// Split off a sub-cursor over the next `n` octets, advancing this cursor past them.
    ///
    /// Useful for self-describing fields with a declared length: whatever is decoded from the
    /// sub-cursor can't overrun the declared length.
    pub fn take(&mut self, n: usize) -> PduResult<HexCursor<'a>> {
        let data = self.read_octets(n)?;
        Ok(HexCursor { data, pos: 0 })
    }
}
