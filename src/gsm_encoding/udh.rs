//! Utilities for dealing with User Data Headers (used for concatenated SMS, among other things)
//! inside messages.
//!
//! [This Wikipedia article](https://en.wikipedia.org/wiki/User_Data_Header) explains what this is
//! for pretty well. Most uses of the UDH are vestigial; nowadays it's mostly useful for sending
//! concatenated SMS.
//!
//! A UDH is a length octet followed by a run of Information Elements, each of which is an
//! identifier octet, a length octet, and that many octets of payload.
use crate::cursor::HexCursor;
use crate::errors::*;
use crate::util::HexData;

/// Identifier of the concatenated SMS element with an 8-bit reference.
pub const IEI_CONCATENATED_8BIT: u8 = 0x00;
/// Identifier of the concatenated SMS element with a 16-bit reference.
pub const IEI_CONCATENATED_16BIT: u8 = 0x08;

/// Data about a concatenated SMS.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ConcatenatedSms {
    /// Reference that identifies which message this is a part of - this is like an ID for the
    /// whole message.
    pub reference: u16,
    /// How many parts to the message exist (e.g. 2).
    pub parts: u8,
    /// Which part this is (e.g. 1 of 2).
    pub sequence: u8
}
/// Payload of an Information Element.
#[derive(Debug, Clone, PartialEq, Eq, is_enum_variant)]
pub enum IeData {
    /// Concatenated SMS metadata (identifiers 0x00 and 0x08).
    Concatenated(ConcatenatedSms),
    /// Anything else, passed through untouched.
    Raw(Vec<u8>)
}
/// Information Element, i.e. one component of a User Data Header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationElement {
    /// Element identifier.
    pub id: u8,
    /// Element payload.
    pub data: IeData
}
impl InformationElement {
    /// Make a concatenated SMS element with an 8-bit reference.
    pub fn concatenated_8bit(reference: u8, parts: u8, sequence: u8) -> Self {
        InformationElement {
            id: IEI_CONCATENATED_8BIT,
            data: IeData::Concatenated(ConcatenatedSms {
                reference: reference as u16, parts, sequence
            })
        }
    }
    /// Make a concatenated SMS element with a 16-bit reference.
    pub fn concatenated_16bit(reference: u16, parts: u8, sequence: u8) -> Self {
        InformationElement {
            id: IEI_CONCATENATED_16BIT,
            data: IeData::Concatenated(ConcatenatedSms { reference, parts, sequence })
        }
    }
    /// Decode one element, leaving the cursor just after its payload.
    pub fn decode(cur: &mut HexCursor) -> PduResult<Self> {
        let id = cur.read_octet()?;
        let len = cur.read_octet()? as usize;
        let payload = cur.read_bytes(len)?;
        let data = match id {
            IEI_CONCATENATED_8BIT => {
                if payload.len() != 3 {
                    return Err(PduError::Validation(format!("8-bit concatenated SMS element has length {}, expected 3", payload.len())));
                }
                IeData::Concatenated(ConcatenatedSms {
                    reference: payload[0] as _,
                    parts: payload[1],
                    sequence: payload[2]
                })
            },
            IEI_CONCATENATED_16BIT => {
                if payload.len() != 4 {
                    return Err(PduError::Validation(format!("16-bit concatenated SMS element has length {}, expected 4", payload.len())));
                }
                IeData::Concatenated(ConcatenatedSms {
                    reference: ((payload[0] as u16) << 8) | (payload[1] as u16),
                    parts: payload[2],
                    sequence: payload[3]
                })
            },
            _ => IeData::Raw(payload)
        };
        trace!("decoded information element {:#04x}: {:?}", id, data);
        Ok(InformationElement { id, data })
    }
    fn payload(&self) -> PduResult<Vec<u8>> {
        match self.data {
            IeData::Raw(ref data) => Ok(data.clone()),
            IeData::Concatenated(c) => match self.id {
                IEI_CONCATENATED_8BIT => {
                    if c.reference > 0xFF {
                        return Err(PduError::Validation(format!("reference {} doesn't fit an 8-bit concatenated SMS element", c.reference)));
                    }
                    Ok(vec![c.reference as u8, c.parts, c.sequence])
                },
                IEI_CONCATENATED_16BIT => {
                    Ok(vec![(c.reference >> 8) as u8, c.reference as u8, c.parts, c.sequence])
                },
                x => Err(PduError::Validation(format!("element {:#04x} can't carry concatenated SMS data", x)))
            }
        }
    }
    /// Serialize this element to wire format.
    pub fn as_bytes(&self) -> PduResult<Vec<u8>> {
        let payload = self.payload()?;
        if payload.len() > 0xFF {
            return Err(PduError::Validation(format!("element {:#04x} payload is too long ({} octets)", self.id, payload.len())));
        }
        let mut ret = Vec::with_capacity(payload.len() + 2);
        ret.push(self.id);
        ret.push(payload.len() as u8);
        ret.extend(payload);
        Ok(ret)
    }
}
/// A User Data Header itself.
///
/// You'll likely just want to call `concatenated_sms` on this to check whether the message is
/// concatenated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDataHeader {
    pub elements: Vec<InformationElement>
}
impl UserDataHeader {
    /// If there is concatenated SMS data in this header, return it.
    pub fn concatenated_sms(&self) -> Option<ConcatenatedSms> {
        self.elements.iter()
            .filter_map(|el| match el.data {
                IeData::Concatenated(c) => Some(c),
                _ => None
            })
            .next()
    }
    /// Encoded length of the elements, not counting the length octet.
    pub fn length(&self) -> PduResult<usize> {
        Ok(self.as_bytes()?.len() - 1)
    }
    /// Decode a header, starting at its length octet. Exactly that many octets of elements are
    /// consumed; an element that runs past the declared length is an error.
    pub fn decode(cur: &mut HexCursor) -> PduResult<Self> {
        let len = cur.read_octet()? as usize;
        let mut sub = cur.take(len)?;
        let mut elements = vec![];
        while !sub.is_empty() {
            elements.push(InformationElement::decode(&mut sub)?);
        }
        Ok(UserDataHeader { elements })
    }
    /// Serialize this UDH to wire format, including the leading length octet.
    pub fn as_bytes(&self) -> PduResult<Vec<u8>> {
        let mut ret = vec![0];
        for el in self.elements.iter() {
            ret.extend(el.as_bytes()?);
        }
        let len = ret.len() - 1;
        if len > 0xFF {
            return Err(PduError::Validation(format!("user data header is too long ({} octets)", len)));
        }
        ret[0] = len as u8;
        Ok(ret)
    }
    /// Serialize this UDH to a hex string, including the leading length octet.
    pub fn encode(&self) -> PduResult<String> {
        Ok(HexData(&self.as_bytes()?).to_string())
    }
}
#[cfg(test)]
mod test {
    use super::*;

    fn decode(hex: &str) -> PduResult<UserDataHeader> {
        UserDataHeader::decode(&mut HexCursor::new(hex).unwrap())
    }
    #[test]
    fn concatenated_8bit() {
        let udh = decode("050003CC0201").unwrap();
        assert_eq!(udh.elements, vec![InformationElement::concatenated_8bit(0xCC, 2, 1)]);
        assert_eq!(udh.concatenated_sms(), Some(ConcatenatedSms { reference: 0xCC, parts: 2, sequence: 1 }));
        assert_eq!(udh.encode().unwrap(), "050003CC0201");
        assert_eq!(udh.length().unwrap(), 5);
    }
    #[test]
    fn concatenated_16bit() {
        let udh = decode("060804123403FF").unwrap();
        assert_eq!(udh.concatenated_sms(), Some(ConcatenatedSms { reference: 0x1234, parts: 3, sequence: 0xFF }));
        assert_eq!(udh.encode().unwrap(), "060804123403FF");
    }
    #[test]
    fn raw_elements_pass_through() {
        let mut cur = HexCursor::new("0B05040B8423F00003A70301FFFF").unwrap();
        let udh = UserDataHeader::decode(&mut cur).unwrap();
        assert_eq!(udh.elements[0], InformationElement {
            id: 0x05,
            data: IeData::Raw(vec![0x0B, 0x84, 0x23, 0xF0])
        });
        assert_eq!(udh.concatenated_sms(), Some(ConcatenatedSms { reference: 0xA7, parts: 3, sequence: 1 }));
        // the cursor stops right after the header
        assert_eq!(cur.read_octets(2).unwrap(), "FFFF");
        assert_eq!(udh.encode().unwrap(), "0B05040B8423F00003A70301");
    }
    #[test]
    fn no_concatenation() {
        let udh = decode("0401020A0B").unwrap();
        assert!(udh.elements[0].data.is_raw());
        assert_eq!(udh.concatenated_sms(), None);
    }
    #[test]
    fn element_overruns_header() {
        assert!(decode("05000403CC0201").unwrap_err().is_malformed_input());
        assert!(decode("0600").unwrap_err().is_malformed_input());
    }
    #[test]
    fn bad_concatenation_length() {
        assert!(decode("0400020102").unwrap_err().is_validation());
    }
    #[test]
    fn encode_validation() {
        let el = InformationElement {
            id: IEI_CONCATENATED_8BIT,
            data: IeData::Concatenated(ConcatenatedSms { reference: 0x100, parts: 2, sequence: 1 })
        };
        assert!(el.as_bytes().unwrap_err().is_validation());
        let el = InformationElement {
            id: 0x24,
            data: IeData::Concatenated(ConcatenatedSms { reference: 1, parts: 2, sequence: 1 })
        };
        assert!(el.as_bytes().unwrap_err().is_validation());
        assert_eq!(UserDataHeader::default().encode().unwrap(), "00");
    }
}
