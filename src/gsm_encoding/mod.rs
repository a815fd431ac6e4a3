//! Utilities for dealing with the (annoying) GSM 7-bit encoding (GSM 03.38), and the UCS2
//! encoding used for everything the 7-bit alphabet can't represent.
//!
//! "The annoying GSM 7-bit encoding" is otherwise known as [GSM
//! 03.38](https://en.wikipedia.org/wiki/GSM_03.38), and that Wikipedia article is pretty
//! informative.
//!
//! There are two layers here:
//!
//! - *unpacked* septets (one `u8` per 7-bit character index), converted to and from text by
//!   `gsm_decode_string` and `gsm_encode_string`;
//! - *packed* septets, as they appear on the wire: 8 septets squeezed into 7 octets, filling
//!   each octet from its low bits. `pack_septets` and `unpack_septets` convert between the two.
//!
//! `decode_gsm7` and `encode_gsm7` do both steps at once, on hex strings.
//!
//! **NB:** SMS messages that are longer than the per-message character limit are sent & received
//! as [concatenated SMS](https://en.wikipedia.org/wiki/Concatenated_SMS) messages. See
//! `split_message`.

use encoding::{Encoding, DecoderTrap, EncoderTrap};
use encoding::all::UTF_16BE;
use crate::pdu::MessageEncoding;
use crate::errors::*;
use crate::util::HexData;

mod lookup_tables;
pub mod udh;

use self::lookup_tables::*;

/// The septet that switches the next septet over to the extension table.
pub const GSM_ESCAPE: u8 = 0x1B;
/// Carriage return, used to pad messages that would otherwise end with 7 spare zero bits.
pub const GSM_CR: u8 = 0x0D;

/// Maximum number of septets in a single, unconcatenated message.
pub const MAX_SEPTETS: usize = 160;
/// Maximum number of septets in one part of a concatenated message (the UDH eats the rest).
pub const MAX_SEPTETS_CONCATENATED: usize = 153;
/// Maximum number of UCS2 octets in a single, unconcatenated message.
pub const MAX_UCS2_OCTETS: usize = 140;
/// Maximum number of UCS2 octets in one part of a concatenated message.
pub const MAX_UCS2_OCTETS_CONCATENATED: usize = 134;

fn lookup_standard(septet: u8) -> Option<char> {
    GSM_ENCODING_TABLE.iter()
        .find(|&&(_, val)| val == septet)
        .map(|&(ch, _)| ch)
}
fn lookup_extended(septet: u8) -> Option<char> {
    GSM_EXTENDED_ENCODING_TABLE.iter()
        .find(|&&(_, val)| val == septet)
        .map(|&(ch, _)| ch)
}
/// Decode a buffer of **unpacked** septets into a string.
///
/// An escape septet selects the extension table for the septet after it; if that septet has no
/// extension table entry, a space is produced instead. A trailing escape produces nothing.
pub fn gsm_decode_string(input: &[u8]) -> String {
    let mut ret = String::with_capacity(input.len());
    let mut iter = input.iter();
    while let Some(&b) = iter.next() {
        match b {
            b'A' ..= b'Z' | b'a' ..= b'z' | b'0' ..= b'9' => {
                ret.push(b as char);
            },
            GSM_ESCAPE => {
                if let Some(&ext) = iter.next() {
                    ret.push(lookup_extended(ext).unwrap_or(' '));
                }
            },
            b => {
                if let Some(ch) = lookup_standard(b) {
                    ret.push(ch);
                }
            }
        }
    }
    ret
}
/// Tries to encode a character into the given destination buffer, returning `true` if the
/// character was successfully encoded, and `false` if the character cannot be represented in the
/// GSM 7-bit encoding.
pub fn try_gsm_encode_char(b: char, dest: &mut Vec<u8>) -> bool {
    match b {
        'A' ..= 'Z' | 'a' ..= 'z' | '0' ..= '9' => {
            dest.push(b as u8);
            return true;
        },
        b => {
            for &(ch, val) in GSM_ENCODING_TABLE.iter() {
                if b == ch {
                    dest.push(val);
                    return true;
                }
            }
            for &(ch, val) in GSM_EXTENDED_ENCODING_TABLE.iter() {
                if b == ch {
                    dest.push(GSM_ESCAPE);
                    dest.push(val);
                    return true;
                }
            }
        }
    }
    false
}
/// Encode a string as GSM 7-bit, returning a buffer of **unpacked** septets.
///
/// Fails with `PduError::Encoding` on the first character that's in neither the standard nor
/// the extension table.
pub fn gsm_encode_string(input: &str) -> PduResult<Vec<u8>> {
    let mut ret = Vec::with_capacity(input.len());
    for c in input.chars() {
        if !try_gsm_encode_char(c, &mut ret) {
            return Err(PduError::Encoding(c));
        }
    }
    Ok(ret)
}
/// Pack septets into octets, 8 septets to 7 octets, each octet filled from its low bits.
///
/// Any bits left over in the last octet are zero.
pub fn pack_septets(septets: &[u8]) -> Vec<u8> {
    let mut ret = Vec::with_capacity((septets.len() * 7 + 7) / 8);
    let mut acc: u16 = 0;
    // Number of bits in `acc` not yet written out.
    let mut bits = 0;
    for s in septets.iter() {
        acc |= ((*s & 0b0111_1111) as u16) << bits;
        bits += 7;
        if bits >= 8 {
            ret.push(acc as u8);
            acc >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        ret.push(acc as u8);
    }
    ret
}
/// Unpack octets into septets. `n` octets always yield `(n * 8) / 7` septets; any leftover
/// high bits in the last octet are dropped.
pub fn unpack_septets(octets: &[u8]) -> Vec<u8> {
    let mut ret = Vec::with_capacity(octets.len() * 8 / 7);
    let mut acc: u16 = 0;
    let mut bits = 0;
    for b in octets.iter() {
        acc |= (*b as u16) << bits;
        bits += 8;
        while bits >= 7 {
            ret.push((acc & 0b0111_1111) as u8);
            acc >>= 7;
            bits -= 7;
        }
    }
    ret
}
/// Decode a hex string of packed GSM 7-bit data.
///
/// With `strip_padding`, a single trailing carriage return is dropped if the data held a
/// multiple of 8 septets (i.e. it's the padding `encode_gsm7` adds to fill the last octet).
///
/// ```
/// assert_eq!(smspdu::decode_gsm7("C8F71D14969741F977FD07", false).unwrap(), "How are you?");
/// ```
pub fn decode_gsm7(hex: &str, strip_padding: bool) -> PduResult<String> {
    let septets = unpack_septets(&HexData::decode(hex)?);
    let mut ret = gsm_decode_string(&septets);
    if strip_padding && septets.len() % 8 == 0 && ret.ends_with('\r') {
        ret.pop();
    }
    Ok(ret)
}
/// Encode text as a hex string of packed GSM 7-bit data.
///
/// With `with_padding`, a carriage return is appended when the message would otherwise leave 7
/// spare zero bits at the end of the last octet (which a receiver would read as a trailing `@`),
/// and when the message fills a whole number of octets and already ends with a carriage return
/// (so the receiver doesn't strip the real one as padding).
///
/// ```
/// assert_eq!(smspdu::encode_gsm7("hello", false).unwrap(), "E8329BFD06");
/// ```
pub fn encode_gsm7(text: &str, with_padding: bool) -> PduResult<String> {
    let mut septets = gsm_encode_string(text)?;
    if with_padding {
        if !septets.is_empty() && septets.len() % 8 == 0 && text.ends_with('\r') {
            septets.push(GSM_CR);
        }
        if septets.len() % 8 == 7 {
            septets.push(GSM_CR);
        }
    }
    Ok(HexData(&pack_septets(&septets)).to_string())
}
/// Decode big-endian UTF-16 bytes.
pub fn ucs2_decode_bytes(bytes: &[u8]) -> PduResult<String> {
    UTF_16BE.decode(bytes, DecoderTrap::Strict)
        .map_err(|_| PduError::malformed(0, "invalid UCS2 data"))
}
/// Encode text as big-endian UTF-16 bytes.
pub fn ucs2_encode_bytes(text: &str) -> PduResult<Vec<u8>> {
    UTF_16BE.encode(text, EncoderTrap::Strict)
        .map_err(|e| PduError::Validation(format!("can't encode text as UCS2: {}", e)))
}
/// Decode a hex string of UCS2 (big-endian UTF-16) data.
///
/// ```
/// assert_eq!(smspdu::decode_ucs2("004C006F00720065006D00200049007000730075006D").unwrap(), "Lorem Ipsum");
/// ```
pub fn decode_ucs2(hex: &str) -> PduResult<String> {
    ucs2_decode_bytes(&HexData::decode(hex)?)
}
/// Encode text as a hex string of UCS2 (big-endian UTF-16) data.
pub fn encode_ucs2(text: &str) -> PduResult<String> {
    Ok(HexData(&ucs2_encode_bytes(text)?).to_string())
}
fn ends_mid_escape(septets: &[u8]) -> bool {
    let mut i = 0;
    while i < septets.len() {
        if septets[i] == GSM_ESCAPE {
            if i + 1 == septets.len() {
                return true;
            }
            i += 2;
        }
        else {
            i += 1;
        }
    }
    false
}
fn ends_mid_surrogate(ucs2: &[u8]) -> bool {
    match *ucs2 {
        [.., hi, _] => (0xD8..=0xDB).contains(&hi),
        _ => false
    }
}
fn split_buffers<F>(buf: &[u8], max_len: usize, step: usize, would_tear: F) -> Vec<&[u8]>
    where F: Fn(&[u8]) -> bool {
    let mut ret = vec![];
    let mut cbuf = buf;
    while max_len < cbuf.len() {
        let mut split = max_len;
        if would_tear(&cbuf[..split]) {
            split -= step;
        }
        let (part, rest) = cbuf.split_at(split);
        ret.push(part);
        cbuf = rest;
    }
    ret.push(cbuf);
    ret
}
/// Work out how to send `msg`: in which encoding, and whether it has to be split up into
/// several concatenated parts (in which case more than one string is returned, in order).
///
/// GSM 7-bit is used if every character is representable in it, UCS2 otherwise. Parts are
/// never split in the middle of an escape sequence or a UTF-16 surrogate pair.
pub fn split_message(msg: &str) -> PduResult<(MessageEncoding, Vec<String>)> {
    match gsm_encode_string(msg) {
        Ok(buf) => {
            if buf.len() <= MAX_SEPTETS {
                return Ok((MessageEncoding::Gsm7Bit, vec![msg.to_owned()]));
            }
            let parts = split_buffers(&buf, MAX_SEPTETS_CONCATENATED, 1, ends_mid_escape)
                .into_iter()
                .map(gsm_decode_string)
                .collect();
            Ok((MessageEncoding::Gsm7Bit, parts))
        },
        Err(e) => {
            debug!("falling back to UCS2: {}", e);
            let buf = ucs2_encode_bytes(msg)?;
            if buf.len() <= MAX_UCS2_OCTETS {
                return Ok((MessageEncoding::Ucs2, vec![msg.to_owned()]));
            }
            let parts = split_buffers(&buf, MAX_UCS2_OCTETS_CONCATENATED, 2, ends_mid_surrogate)
                .into_iter()
                .map(ucs2_decode_bytes)
                .collect::<PduResult<_>>()?;
            Ok((MessageEncoding::Ucs2, parts))
        }
    }
}
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_literals() {
        assert_eq!(decode_gsm7("C8F71D14969741F977FD07", false).unwrap(), "How are you?");
        assert_eq!(decode_gsm7("32D0A60C8287E5A0F63B3D07", false).unwrap(), "2 € par mois");
        assert_eq!(decode_gsm7("E8329BFD06", false).unwrap(), "hello");
        assert_eq!(decode_gsm7("1B5E0CB6296F7C", false).unwrap(), "[10€]");
        assert_eq!(decode_gsm7("", false).unwrap(), "");
    }
    #[test]
    fn encode_literals() {
        assert_eq!(encode_gsm7("hello", false).unwrap(), "E8329BFD06");
        assert_eq!(encode_gsm7("hellohello", false).unwrap(), "E8329BFD4697D9EC37");
        assert_eq!(encode_gsm7("12345678", false).unwrap(), "31D98C56B3DD70");
        assert_eq!(encode_gsm7("[10€]", false).unwrap(), "1B5E0CB6296F7C");
        assert_eq!(encode_gsm7("2 € par mois", false).unwrap(), "32D0A60C8287E5A0F63B3D07");
        assert_eq!(encode_gsm7("", false).unwrap(), "");
    }
    #[test]
    fn long_message() {
        let decoded = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
                       sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";
        let encoded = "CCB7BCDC06A5E1F37A1B447EB3DF72D03C4D0785DB653A0B347EBBE7E531BD4CAFCB4161\
                       721A9E9E8FD3EE33A8CC4ED359A079990C22BF41E5747DDE7E9341F4721BFE9683D2EE71\
                       9A9C26D7DD74509D0E6287C56F791954A683C86FF65B5E06B5C36777181466A7E3F5B00B";
        assert_eq!(encode_gsm7(decoded, false).unwrap(), encoded);
        assert_eq!(decode_gsm7(encoded, false).unwrap(), decoded);
    }
    #[test]
    fn padding_with_extension_chars() {
        // 9 septets: no padding rule applies
        assert_eq!(encode_gsm7("123456€\r", true).unwrap(), "31D98C56B36DCA0D");
        assert_eq!(encode_gsm7("12345678\r", true).unwrap(), "31D98C56B3DD700D");
        // 7 septets, the last of which is already a CR: one more CR still goes on the end
        assert_eq!(encode_gsm7("1115€\r", true).unwrap(), "B158ACB629371A");
        assert_eq!(encode_gsm7("*115*5\r", true).unwrap(), "AA58ACA6AA351A");
    }
    #[test]
    fn padding_8n_plus_7() {
        assert_eq!(encode_gsm7("1234567", true).unwrap(), "31D98C56B3DD1A");
        assert_eq!(encode_gsm7("0123456789ABCDE", true).unwrap(), "B0986C46ABD96EB85C503824161B");
        // exactly one padding septet: 8 septets pack into 7 octets, 16 into 14
        assert_eq!(encode_gsm7("1234567", true).unwrap().len(), 14);
        assert_eq!(encode_gsm7("0123456789ABCDE", true).unwrap().len(), 28);
        assert_eq!(decode_gsm7("31D98C56B3DD1A", true).unwrap(), "1234567");
        assert_eq!(decode_gsm7("B0986C46ABD96EB85C503824161B", true).unwrap(), "0123456789ABCDE");
        // without padding, the spare bits come out as an '@'
        assert_eq!(encode_gsm7("1234567", false).unwrap(), "31D98C56B3DD00");
        assert_eq!(decode_gsm7("31D98C56B3DD00", false).unwrap(), "1234567@");
    }
    #[test]
    fn padding_8n() {
        // 8 septets not ending in CR: left alone
        assert_eq!(encode_gsm7("12345678", true).unwrap(), "31D98C56B3DD70");
        // 8 septets ending in CR: the CR is doubled
        assert_eq!(encode_gsm7("1234567\r", true).unwrap(), "31D98C56B3DD1A0D");
        assert_eq!(decode_gsm7("31D98C56B3DD1A0D", true).unwrap(), "1234567\r\r");
        // stripping only happens on a multiple of 8 septets
        assert_eq!(decode_gsm7("31D98C56B3DD1A", false).unwrap(), "1234567\r");
        assert_eq!(decode_gsm7("31D98C56B3DD1A", true).unwrap(), "1234567");
        assert_eq!(decode_gsm7("31D98C56B3DD700D", true).unwrap(), "12345678\r");
    }
    #[test]
    fn escapes() {
        // escape followed by something not in the extension table
        assert_eq!(gsm_decode_string(&[b'a', GSM_ESCAPE, 0x41, b'b']), "a b");
        // trailing escape
        assert_eq!(gsm_decode_string(&[b'a', GSM_ESCAPE]), "a");
        assert_eq!(gsm_encode_string("{\u{000C}}").unwrap(),
                   vec![GSM_ESCAPE, 0x28, GSM_ESCAPE, 0x0A, GSM_ESCAPE, 0x29]);
        assert_eq!(gsm_decode_string(&[GSM_ESCAPE, 0x28, GSM_ESCAPE, 0x0A, GSM_ESCAPE, 0x29]),
                   "{\u{000C}}");
    }
    #[test]
    fn unencodable() {
        assert_eq!(encode_gsm7("hi 中", false).unwrap_err(), PduError::Encoding('中'));
        assert!(encode_gsm7("\u{1B}", false).unwrap_err().is_encoding());
    }
    #[test]
    fn septet_packing() {
        assert_eq!(pack_septets(&[]), Vec::<u8>::new());
        assert_eq!(pack_septets(&[0x68]), vec![0x68]);
        assert_eq!(unpack_septets(&[0x68]), vec![0x68]);
        assert_eq!(unpack_septets(&[0xE8, 0x32, 0x9B, 0xFD, 0x06]),
                   vec![0x68, 0x65, 0x6C, 0x6C, 0x6F]);
        let septets = (0..16).map(|x| x * 7).collect::<Vec<u8>>();
        assert_eq!(unpack_septets(&pack_septets(&septets)), septets);
    }
    #[test]
    fn ucs2() {
        assert_eq!(decode_ucs2("004C006F00720065006D00200049007000730075006D").unwrap(), "Lorem Ipsum");
        assert_eq!(encode_ucs2("Je pompe donc je suis.").unwrap(),
                   "004A006500200070006F006D0070006500200064006F006E00630020006A006500200073007500690073002E");
        assert_eq!(encode_ucs2("😀").unwrap(), "D83DDE00");
        assert_eq!(decode_ucs2("D83DDE00").unwrap(), "😀");
        assert!(decode_ucs2("004C00").unwrap_err().is_malformed_input());
        assert!(decode_ucs2("D83D").unwrap_err().is_malformed_input());
    }
    #[test]
    fn split_short() {
        let (enc, parts) = split_message("hello").unwrap();
        assert_eq!(enc, MessageEncoding::Gsm7Bit);
        assert_eq!(parts, vec!["hello".to_owned()]);
        let (enc, parts) = split_message("привет").unwrap();
        assert_eq!(enc, MessageEncoding::Ucs2);
        assert_eq!(parts.len(), 1);
    }
    #[test]
    fn split_long_gsm() {
        let msg = "a".repeat(160);
        assert_eq!(split_message(&msg).unwrap().1.len(), 1);
        let msg = "a".repeat(161);
        let (_, parts) = split_message(&msg).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 153);
        assert_eq!(parts[1].len(), 8);
        // a euro sign straddling the 153-septet boundary stays in one piece
        let msg = format!("{}€{}", "a".repeat(152), "b".repeat(20));
        let (_, parts) = split_message(&msg).unwrap();
        assert_eq!(parts[0], "a".repeat(152));
        assert_eq!(parts[1], format!("€{}", "b".repeat(20)));
        assert_eq!(parts.concat(), msg);
    }
    #[test]
    fn split_long_ucs2() {
        let msg = "д".repeat(71);
        let (enc, parts) = split_message(&msg).unwrap();
        assert_eq!(enc, MessageEncoding::Ucs2);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), 67);
        // a surrogate pair straddling the 134-octet boundary stays in one piece
        let msg = format!("{}😀{}", "д".repeat(66), "д".repeat(10));
        let (_, parts) = split_message(&msg).unwrap();
        assert_eq!(parts[0], "д".repeat(66));
        assert_eq!(parts.concat(), msg);
    }
}
