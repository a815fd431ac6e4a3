//! The User Data field: the message body, optionally preceded by a User Data Header.
//!
//! How the field is laid out depends on things decoded earlier in the TPDU (the encoding from
//! the DCS, and whether the header flags say there's a UDH), which get passed in as a
//! `UserDataContext`.
//!
//! For GSM 7-bit data, the length octet counts septets, and the header occupies the start of the
//! packed septet stream: the text begins at the first septet boundary after the header's last
//! bit. For everything else the length counts octets.
use crate::cursor::HexCursor;
use crate::errors::*;
use crate::gsm_encoding::{gsm_decode_string, gsm_encode_string, pack_septets, unpack_septets,
                          ucs2_decode_bytes, ucs2_encode_bytes};
use crate::gsm_encoding::udh::UserDataHeader;
use crate::util::HexData;
use super::MessageEncoding;

/// Message body.
#[derive(Debug, Clone, PartialEq, Eq, is_enum_variant)]
pub enum Content {
    /// Text (sent as either GSM 7-bit or UCS2).
    Text(String),
    /// 8-bit data.
    Binary(Vec<u8>)
}
impl Content {
    /// The text of this message, if it's text.
    pub fn text(&self) -> Option<&str> {
        match *self {
            Content::Text(ref t) => Some(t),
            Content::Binary(_) => None
        }
    }
}
/// What the rest of the TPDU says about the user data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UserDataContext {
    /// Encoding, from the data coding scheme.
    pub encoding: MessageEncoding,
    /// Whether the User Data Header Indicator is set.
    pub has_header: bool
}
/// The decoded User Data field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub header: Option<UserDataHeader>,
    pub content: Content
}
/// Number of septets taken up by a header of `udh_bytes` octets (including its length octet).
fn fill_septets(udh_bytes: usize) -> usize {
    (udh_bytes * 8 + 6) / 7
}
impl UserData {
    /// Decode the field, starting at the User Data Length octet.
    pub fn decode(cur: &mut HexCursor, ctx: UserDataContext) -> PduResult<Self> {
        let len = cur.read_octet()? as usize;
        trace!("user data length {} ({:?})", len, ctx);
        if ctx.encoding == MessageEncoding::Gsm7Bit {
            let octets = (len * 7 + 7) / 8;
            let mut span = cur.take(octets)?;
            let data = span.clone().read_bytes(octets)?;
            let (header, fill) = if ctx.has_header {
                let header = UserDataHeader::decode(&mut span)?;
                (Some(header), fill_septets(span.position() / 2))
            }
            else {
                (None, 0)
            };
            let septets = unpack_septets(&data);
            let end = ::std::cmp::min(len, septets.len());
            let start = ::std::cmp::min(fill, end);
            trace!("user data text is septets {}..{}", start, end);
            let content = Content::Text(gsm_decode_string(&septets[start..end]));
            return Ok(UserData { header, content });
        }
        let header = if ctx.has_header {
            Some(UserDataHeader::decode(cur)?)
        }
        else {
            None
        };
        let header_bytes = match header {
            Some(ref h) => h.length()? + 1,
            None => 0
        };
        let body = cur.read_bytes(len.saturating_sub(header_bytes))?;
        let content = match ctx.encoding {
            MessageEncoding::Ucs2 => Content::Text(ucs2_decode_bytes(&body)?),
            _ => Content::Binary(body)
        };
        Ok(UserData { header, content })
    }
    /// Encode the field, including the User Data Length octet.
    pub fn encode(&self, ctx: UserDataContext) -> PduResult<String> {
        if self.header.is_some() != ctx.has_header {
            return Err(PduError::Validation(format!("user data header presence ({}) doesn't match the UDHI flag ({})", self.header.is_some(), ctx.has_header)));
        }
        let header = match self.header {
            Some(ref h) => h.as_bytes()?,
            None => vec![]
        };
        let (len, data) = match (ctx.encoding, &self.content) {
            (MessageEncoding::Gsm7Bit, &Content::Text(ref text)) => {
                let mut septets = vec![0; fill_septets(header.len())];
                septets.extend(gsm_encode_string(text)?);
                let mut packed = pack_septets(&septets);
                packed[..header.len()].copy_from_slice(&header);
                (septets.len(), packed)
            },
            (MessageEncoding::Ucs2, &Content::Text(ref text)) => {
                let mut data = header;
                data.extend(ucs2_encode_bytes(text)?);
                (data.len(), data)
            },
            (MessageEncoding::Binary, &Content::Binary(ref body)) => {
                let mut data = header;
                data.extend(body.iter().cloned());
                (data.len(), data)
            },
            (enc, content) => {
                return Err(PduError::Validation(format!("can't encode {} content as {:?}", if content.is_text() { "text" } else { "binary" }, enc)));
            }
        };
        if len > 0xFF {
            return Err(PduError::Validation(format!("user data is too long ({} units)", len)));
        }
        Ok(format!("{:02X}{}", len, HexData(&data)))
    }
}
