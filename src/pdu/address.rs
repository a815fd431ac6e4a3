//! Addresses: the sender/recipient fields of a TPDU, and the SMSC field in front of it.
//!
//! On the wire an address is a length, a Type-Of-Address octet, and the number itself, as
//! nibble-swapped BCD (or, for alphanumeric senders, packed GSM 7-bit).
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;
use crate::cursor::HexCursor;
use crate::errors::*;
use crate::gsm_encoding::{gsm_decode_string, gsm_encode_string, pack_septets, unpack_septets};
use crate::util::{HexData, PduFromPrimitive, check_hex, check_hex_digits, swap_nibbles};

/// Type Of Number, bits 6-4 of the Type-Of-Address octet.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum TypeOfNumber {
    Unknown = 0b0_000_0000,
    International = 0b0_001_0000,
    National = 0b0_010_0000,
    Specific = 0b0_011_0000,
    Subscriber = 0b0_100_0000,
    /// The "number" is GSM 7-bit text (e.g. a company name).
    Alphanumeric = 0b0_101_0000,
    Abbreviated = 0b0_110_0000,
    Extended = 0b0_111_0000
}
impl TypeOfNumber {
    const ALL: [TypeOfNumber; 8] = [
        TypeOfNumber::Unknown, TypeOfNumber::International, TypeOfNumber::National,
        TypeOfNumber::Specific, TypeOfNumber::Subscriber, TypeOfNumber::Alphanumeric,
        TypeOfNumber::Abbreviated, TypeOfNumber::Extended
    ];
    /// Lower-case name of this type of number.
    pub fn name(self) -> &'static str {
        use self::TypeOfNumber::*;
        match self {
            Unknown => "unknown",
            International => "international",
            National => "national",
            Specific => "specific",
            Subscriber => "subscriber",
            Alphanumeric => "alphanumeric",
            Abbreviated => "abbreviated",
            Extended => "extended"
        }
    }
}
impl fmt::Display for TypeOfNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for TypeOfNumber {
    type Err = PduError;
    fn from_str(st: &str) -> PduResult<Self> {
        Self::ALL.iter()
            .cloned()
            .find(|x| x.name() == st)
            .ok_or_else(|| PduError::Validation(format!("unknown type of number {:?}", st)))
    }
}
/// Numbering Plan Identification, bits 3-0 of the Type-Of-Address octet.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum NumberingPlanIdentification {
    Unknown = 0b0_000_0000,
    IsdnTelephone = 0b0_000_0001,
    Data = 0b0_000_0011,
    Telex = 0b0_000_0100,
    Specific1 = 0b0_000_0101,
    Specific2 = 0b0_000_0110,
    National = 0b0_000_1000,
    Private = 0b0_000_1001,
    Ermes = 0b0_000_1010,
    Extended = 0b0_000_1111
}
impl NumberingPlanIdentification {
    const ALL: [NumberingPlanIdentification; 10] = [
        NumberingPlanIdentification::Unknown, NumberingPlanIdentification::IsdnTelephone,
        NumberingPlanIdentification::Data, NumberingPlanIdentification::Telex,
        NumberingPlanIdentification::Specific1, NumberingPlanIdentification::Specific2,
        NumberingPlanIdentification::National, NumberingPlanIdentification::Private,
        NumberingPlanIdentification::Ermes, NumberingPlanIdentification::Extended
    ];
    /// Lower-case name of this numbering plan.
    pub fn name(self) -> &'static str {
        use self::NumberingPlanIdentification::*;
        match self {
            Unknown => "unknown",
            IsdnTelephone => "isdn",
            Data => "data",
            Telex => "telex",
            Specific1 => "specific1",
            Specific2 => "specific2",
            National => "national",
            Private => "private",
            Ermes => "ermes",
            Extended => "extended"
        }
    }
}
impl fmt::Display for NumberingPlanIdentification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for NumberingPlanIdentification {
    type Err = PduError;
    fn from_str(st: &str) -> PduResult<Self> {
        Self::ALL.iter()
            .cloned()
            .find(|x| x.name() == st)
            .ok_or_else(|| PduError::Validation(format!("unknown numbering plan {:?}", st)))
    }
}
/// The Type-Of-Address octet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TypeOfAddress {
    pub type_of_number: TypeOfNumber,
    pub numbering_plan_identification: NumberingPlanIdentification
}
impl Default for TypeOfAddress {
    fn default() -> Self {
        TypeOfAddress {
            type_of_number: TypeOfNumber::International,
            numbering_plan_identification: NumberingPlanIdentification::IsdnTelephone
        }
    }
}
impl TypeOfAddress {
    /// Build a Type-Of-Address from the names of its parts, e.g. `("international", "isdn")`.
    pub fn from_names(ton: &str, npi: &str) -> PduResult<Self> {
        Ok(TypeOfAddress {
            type_of_number: ton.parse()?,
            numbering_plan_identification: npi.parse()?
        })
    }
}
impl TryFrom<u8> for TypeOfAddress {
    type Error = PduError;
    fn try_from(b: u8) -> PduResult<Self> {
        if b & 0b1_000_0000 == 0 {
            return Err(PduError::Validation(format!("type of address {:#04x} doesn't have bit 7 set", b)));
        }
        let type_of_number = TypeOfNumber::from_bits(b & 0b0_111_0000, "type of number")?;
        let numbering_plan_identification = NumberingPlanIdentification::from_bits(b & 0b0_000_1111, "numbering plan identification")?;
        Ok(Self { type_of_number, numbering_plan_identification })
    }
}
impl From<TypeOfAddress> for u8 {
    fn from(toa: TypeOfAddress) -> u8 {
        0b1_000_0000 | toa.type_of_number as u8 | toa.numbering_plan_identification as u8
    }
}
/// Decode a Type-Of-Address octet, given as two hex digits.
///
/// ```
/// use smspdu::pdu::address::*;
/// let toa = smspdu::decode_type_of_address("91").unwrap();
/// assert_eq!(toa.type_of_number, TypeOfNumber::International);
/// assert_eq!(toa.numbering_plan_identification, NumberingPlanIdentification::IsdnTelephone);
/// ```
pub fn decode_type_of_address(hex: &str) -> PduResult<TypeOfAddress> {
    let mut cur = HexCursor::new(hex)?;
    let ret = TypeOfAddress::try_from(cur.read_octet()?)?;
    if !cur.is_empty() {
        return Err(PduError::malformed(cur.position(), "type of address is a single octet"));
    }
    Ok(ret)
}
/// Encode a Type-Of-Address as two hex digits.
pub fn encode_type_of_address(toa: &TypeOfAddress) -> String {
    format!("{:02X}", u8::from(*toa))
}
/// Decode a semi-octet (nibble-swapped BCD) number, dropping the `F` filler digit if present.
///
/// ```
/// assert_eq!(smspdu::decode_number("5155214365F7").unwrap(), "15551234567");
/// ```
pub fn decode_number(hex: &str) -> PduResult<String> {
    check_hex(hex)?;
    let mut ret = swap_nibbles(hex).to_ascii_uppercase();
    if ret.ends_with('F') {
        ret.pop();
    }
    Ok(ret)
}
/// Encode a number as semi-octets, padding odd-length numbers with an `F`.
///
/// ```
/// assert_eq!(smspdu::encode_number("15551234567").unwrap(), "5155214365F7");
/// ```
pub fn encode_number(digits: &str) -> PduResult<String> {
    check_hex_digits(digits)?;
    let mut data = digits.to_ascii_uppercase();
    if data.len() % 2 != 0 {
        data.push('F');
    }
    Ok(swap_nibbles(&data))
}
/// A phone number (or alphanumeric sender name), with its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub type_addr: TypeOfAddress,
    /// The digits of the number (without any `+`), or the text of an alphanumeric address.
    pub number: String
}
impl Address {
    pub fn new(type_addr: TypeOfAddress, number: &str) -> Self {
        Address { type_addr, number: number.to_owned() }
    }
    fn is_alphanumeric(&self) -> bool {
        self.type_addr.type_of_number == TypeOfNumber::Alphanumeric
    }
    /// Encode the number part, returning it as octets along with its length in semi-octets.
    fn payload(&self) -> PduResult<(Vec<u8>, usize)> {
        if self.is_alphanumeric() {
            let septets = gsm_encode_string(&self.number)?;
            let len = (septets.len() * 7 + 3) / 4;
            Ok((pack_septets(&septets), len))
        }
        else {
            let data = HexData::decode(&encode_number(&self.number)?)?;
            Ok((data, self.number.len()))
        }
    }
    fn decode_payload(type_addr: TypeOfAddress, payload: &str, septets: usize) -> PduResult<String> {
        if type_addr.type_of_number == TypeOfNumber::Alphanumeric {
            let mut data = unpack_septets(&HexData::decode(payload)?);
            data.truncate(septets);
            Ok(gsm_decode_string(&data))
        }
        else {
            decode_number(payload)
        }
    }
    /// The on-wire length of this address, in semi-octets.
    pub fn length(&self) -> PduResult<usize> {
        Ok(self.payload()?.1)
    }
    /// Decode a sender/recipient address, whose length octet counts semi-octets of the number.
    pub fn decode(cur: &mut HexCursor) -> PduResult<Self> {
        let len = cur.read_octet()? as usize;
        let type_addr = TypeOfAddress::try_from(cur.read_octet()?)?;
        let payload = cur.read_octets((len + 1) / 2)?;
        let number = Self::decode_payload(type_addr, payload, (len * 4) / 7)?;
        debug!("decoded address: {:?} {}", type_addr, number);
        Ok(Address { type_addr, number })
    }
    /// Encode as a sender/recipient address.
    pub fn encode(&self) -> PduResult<String> {
        let (payload, len) = self.payload()?;
        if len > 0xFF {
            return Err(PduError::Validation(format!("address {:?} is too long", self.number)));
        }
        Ok(format!("{:02X}{:02X}{}", len, u8::from(self.type_addr), HexData(&payload)))
    }
    /// Decode an SMSC address, whose length octet counts the octets that follow it. A length of
    /// zero means no SMSC is given.
    pub fn decode_smsc(cur: &mut HexCursor) -> PduResult<Option<Self>> {
        let len = cur.read_octet()? as usize;
        if len == 0 {
            debug!("no SMSC address");
            return Ok(None);
        }
        let type_addr = TypeOfAddress::try_from(cur.read_octet()?)?;
        let payload = cur.read_octets(len - 1)?;
        let number = Self::decode_payload(type_addr, payload, ((len - 1) * 8) / 7)?;
        debug!("decoded SMSC address: {:?} {}", type_addr, number);
        Ok(Some(Address { type_addr, number }))
    }
    /// Encode an SMSC address; `None` encodes as a zero length.
    pub fn encode_smsc(smsc: Option<&Address>) -> PduResult<String> {
        let smsc = match smsc {
            Some(x) => x,
            None => return Ok("00".into())
        };
        let (payload, _) = smsc.payload()?;
        if payload.len() >= 0xFF {
            return Err(PduError::Validation(format!("SMSC address {:?} is too long", smsc.number)));
        }
        Ok(format!("{:02X}{:02X}{}", payload.len() + 1, u8::from(smsc.type_addr), HexData(&payload)))
    }
}
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.type_addr.type_of_number == TypeOfNumber::International {
            write!(f, "+")?;
        }
        write!(f, "{}", self.number)
    }
}
impl FromStr for Address {
    type Err = PduError;
    /// Parses `+digits` as an international number, `digits` as a number of unknown type, and
    /// anything else as an alphanumeric address.
    fn from_str(st: &str) -> PduResult<Self> {
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
        if st.starts_with('+') {
            let digits = &st[1..];
            if !is_digits(digits) {
                return Err(PduError::Validation(format!("invalid international number {:?}", st)));
            }
            Ok(Address::new(TypeOfAddress::default(), digits))
        }
        else if is_digits(st) {
            Ok(Address::new(TypeOfAddress {
                type_of_number: TypeOfNumber::Unknown,
                numbering_plan_identification: NumberingPlanIdentification::IsdnTelephone
            }, st))
        }
        else if st.is_empty() {
            Err(PduError::Validation("empty address".into()))
        }
        else {
            Ok(Address::new(TypeOfAddress {
                type_of_number: TypeOfNumber::Alphanumeric,
                numbering_plan_identification: NumberingPlanIdentification::Unknown
            }, st))
        }
    }
}
