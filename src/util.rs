//! Hex string helpers, and the bits-to-enum conversion shared by the PDU field decoders.
use std::fmt;
use num::FromPrimitive;
use crate::errors::{PduResult, PduError};

/// Reverses the order of the octets (2-digit groups) in a hex string.
///
/// ```
/// assert_eq!(smspdu::reverse_octets("00F1F2F3"), "F3F2F100");
/// ```
///
/// The input must have an even length; this is not checked.
pub fn reverse_octets(data: &str) -> String {
    data.as_bytes()
        .chunks(2)
        .rev()
        .flat_map(|x| x.iter().map(|&c| c as char))
        .collect()
}
/// Swaps the two nibbles (semi-octets) of each octet in a hex string, keeping the octets in
/// order.
///
/// ```
/// assert_eq!(smspdu::swap_nibbles("0123"), "1032");
/// ```
///
/// The input must have an even length; this is not checked.
pub fn swap_nibbles(data: &str) -> String {
    let mut ret = String::with_capacity(data.len());
    for pair in data.as_bytes().chunks(2) {
        if let [hi, lo] = *pair {
            ret.push(lo as char);
            ret.push(hi as char);
        }
    }
    ret
}
/// Wrapper that formats a byte slice as uppercase hex.
pub struct HexData<'a>(pub &'a [u8]);
impl<'a> fmt::Display for HexData<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
       for b in self.0.iter() {
           write!(f, "{:02X}", b)?;
       }
       Ok(())
    }
}
impl<'a> HexData<'a> {
    /// Parse a hex string (of either case) into bytes.
    pub fn decode(data: &str) -> PduResult<Vec<u8>> {
        check_hex(data)?;
        Ok(data.as_bytes()
            .chunks(2)
            .map(|x| (hex_value(x[0]) << 4) | hex_value(x[1]))
            .collect())
    }
}
/// Check that `data` is an even-length string of hex digits.
pub(crate) fn check_hex(data: &str) -> PduResult<()> {
    check_hex_digits(data)?;
    if data.len() % 2 != 0 {
        return Err(PduError::malformed(data.len(), "hex string has an odd length"));
    }
    Ok(())
}
/// Check that `data` consists only of hex digits.
pub(crate) fn check_hex_digits(data: &str) -> PduResult<()> {
    match data.bytes().position(|c| !c.is_ascii_hexdigit()) {
        Some(pos) => Err(PduError::malformed(pos, "invalid hex digit")),
        None => Ok(())
    }
}
/// Value of a single (already validated) hex digit.
pub(crate) fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0
    }
}
/// Conversion from a masked bit pattern to one of our `#[repr(u8)]` enums, failing with a
/// `Validation` error if the pattern isn't one of the defined values.
pub trait PduFromPrimitive where Self: Sized {
    fn from_bits(bits: u8, what: &'static str) -> PduResult<Self>;
}
impl<T> PduFromPrimitive for T where T: FromPrimitive {
    fn from_bits(bits: u8, what: &'static str) -> PduResult<T> {
        if let Some(s) = T::from_u8(bits) {
            Ok(s)
        }
        else {
            Err(PduError::Validation(format!("invalid {} bits: {:#010b}", what, bits)))
        }
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn reverse() {
        assert_eq!(reverse_octets("00F1F2F3"), "F3F2F100");
        assert_eq!(reverse_octets(""), "");
        assert_eq!(reverse_octets(&reverse_octets("C8F71D14")), "C8F71D14");
    }
    #[test]
    fn swap() {
        assert_eq!(swap_nibbles("0123"), "1032");
        assert_eq!(swap_nibbles("5155214365F7"), "15551234567F");
        assert_eq!(swap_nibbles(&swap_nibbles("5155214365F7")), "5155214365F7");
    }
    #[test]
    fn hex_data() {
        assert_eq!(HexData::decode("00fF1a").unwrap(), vec![0x00, 0xFF, 0x1A]);
        assert_eq!(HexData(&[0x00, 0xFF, 0x1A]).to_string(), "00FF1A");
        assert!(HexData::decode("ABC").unwrap_err().is_malformed_input());
        assert_eq!(HexData::decode("00G0").unwrap_err(),
                   PduError::MalformedInput { offset: 2, reason: "invalid hex digit" });
    }
}
