//! Types for dealing with SMS PDUs: the SMS-DELIVER messages a phone receives, and the
//! SMS-SUBMIT messages it sends.
//!
//! A PDU, as exchanged with a modem, is the SMSC address followed by the TPDU proper. Both are
//! handled here as uppercase hex strings; `SmsDeliver::decode` and `SmsSubmit::decode` take the
//! whole thing apart field by field, and `encode` puts it back together.
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;
use chrono::{DateTime, Duration, Utc};
use crate::cursor::HexCursor;
use crate::errors::*;
use crate::gsm_encoding::split_message;
use crate::gsm_encoding::udh::{InformationElement, UserDataHeader};
use crate::util::{HexData, PduFromPrimitive};

pub mod address;
pub mod timestamp;
pub mod user_data;

use self::address::Address;
use self::timestamp::{Timestamp, encode_date};
use self::user_data::{Content, UserData, UserDataContext};

/// How the user data is encoded, as given by bits 3-2 of the data coding scheme.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum MessageEncoding {
    Gsm7Bit = 0b0000_00_00,
    Binary = 0b0000_01_00,
    Ucs2 = 0b0000_10_00
}
/// Message class, which tells the receiver where to put the message.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum MessageClass {
    /// Class 0: display immediately, don't store.
    Flash = 0b000000_00,
    /// Class 1: store on the mobile equipment.
    MobileEquipment = 0b000000_01,
    /// Class 2: store on the SIM.
    Sim = 0b000000_10,
    /// Class 3: pass on to the terminal equipment.
    TerminalEquipment = 0b000000_11
}
/// The data coding scheme octet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DataCodingScheme(pub u8);
impl DataCodingScheme {
    /// Which encoding the user data is in. Reserved values are taken as GSM 7-bit.
    pub fn encoding(&self) -> MessageEncoding {
        match (self.0 & 0b0000_11_00) >> 2 {
            1 => MessageEncoding::Binary,
            2 => MessageEncoding::Ucs2,
            _ => MessageEncoding::Gsm7Bit
        }
    }
    /// The message class, if one is given.
    pub fn class(&self) -> Option<MessageClass> {
        let has_class = if self.0 & 0b1100_0000 == 0 {
            self.0 & 0b0001_0000 != 0
        }
        else {
            self.0 & 0b1111_0000 == 0b1111_0000
        };
        if has_class {
            MessageClass::from_bits(self.0 & 0b0000_0011, "message class").ok()
        }
        else {
            None
        }
    }
}
impl From<MessageEncoding> for DataCodingScheme {
    fn from(enc: MessageEncoding) -> Self {
        DataCodingScheme(enc as u8)
    }
}
/// Message type of a TPDU travelling towards the phone.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum MessageType {
    Deliver = 0b000000_00,
    SubmitReport = 0b000000_01,
    StatusReport = 0b000000_10
}
/// First octet of an SMS-DELIVER.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PduHeader {
    pub reply_path: bool,
    /// Whether the user data starts with a User Data Header.
    pub user_data_header: bool,
    pub status_report_indication: bool,
    pub loop_prevention: bool,
    /// The raw TP-MMS bit. Note that the network *clears* this to say more messages are waiting.
    pub more_messages_to_send: bool,
    pub message_type: MessageType
}
impl TryFrom<u8> for PduHeader {
    type Error = PduError;
    fn try_from(b: u8) -> PduResult<Self> {
        Ok(PduHeader {
            reply_path: (b & 0b1000_0000) > 0,
            user_data_header: (b & 0b0100_0000) > 0,
            status_report_indication: (b & 0b0010_0000) > 0,
            loop_prevention: (b & 0b0000_1000) > 0,
            more_messages_to_send: (b & 0b0000_0100) > 0,
            message_type: MessageType::from_bits(b & 0b000000_11, "message type indicator")?
        })
    }
}
impl From<PduHeader> for u8 {
    fn from(h: PduHeader) -> u8 {
        let mut ret = h.message_type as u8;
        if h.reply_path {
            ret |= 0b1000_0000;
        }
        if h.user_data_header {
            ret |= 0b0100_0000;
        }
        if h.status_report_indication {
            ret |= 0b0010_0000;
        }
        if h.loop_prevention {
            ret |= 0b0000_1000;
        }
        if h.more_messages_to_send {
            ret |= 0b0000_0100;
        }
        ret
    }
}
/// Message type of a TPDU travelling away from the phone.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum SubmitMessageType {
    DeliverReport = 0b000000_00,
    Submit = 0b000000_01,
    Command = 0b000000_10
}
/// Which kind of validity period (if any) an SMS-SUBMIT carries.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum VpFieldValidity {
    None = 0b000_00_000,
    Enhanced = 0b000_01_000,
    Relative = 0b000_10_000,
    Absolute = 0b000_11_000
}
/// First octet of an SMS-SUBMIT.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SubmitHeader {
    pub reply_path: bool,
    /// Whether the user data starts with a User Data Header.
    pub user_data_header: bool,
    pub status_report_request: bool,
    pub validity_period_format: VpFieldValidity,
    pub reject_duplicates: bool,
    pub message_type: SubmitMessageType
}
impl Default for SubmitHeader {
    fn default() -> Self {
        SubmitHeader {
            reply_path: false,
            user_data_header: false,
            status_report_request: false,
            validity_period_format: VpFieldValidity::None,
            reject_duplicates: false,
            message_type: SubmitMessageType::Submit
        }
    }
}
impl TryFrom<u8> for SubmitHeader {
    type Error = PduError;
    fn try_from(b: u8) -> PduResult<Self> {
        Ok(SubmitHeader {
            reply_path: (b & 0b1000_0000) > 0,
            user_data_header: (b & 0b0100_0000) > 0,
            status_report_request: (b & 0b0010_0000) > 0,
            validity_period_format: VpFieldValidity::from_bits(b & 0b000_11_000, "validity period format")?,
            reject_duplicates: (b & 0b0000_0100) > 0,
            message_type: SubmitMessageType::from_bits(b & 0b000000_11, "message type indicator")?
        })
    }
}
impl From<SubmitHeader> for u8 {
    fn from(h: SubmitHeader) -> u8 {
        let mut ret = h.message_type as u8 | h.validity_period_format as u8;
        if h.reply_path {
            ret |= 0b1000_0000;
        }
        if h.user_data_header {
            ret |= 0b0100_0000;
        }
        if h.status_report_request {
            ret |= 0b0010_0000;
        }
        if h.reject_duplicates {
            ret |= 0b0000_0100;
        }
        ret
    }
}
/// How long the SMSC should keep trying to deliver a submitted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidityPeriod {
    /// Relative to submission, in the encoded form described by `duration`.
    Relative(u8),
    /// Until a given instant.
    Absolute(DateTime<Utc>),
    /// Enhanced format, kept as raw octets.
    Enhanced([u8; 7])
}
impl ValidityPeriod {
    /// The validity period format that goes in the header alongside this.
    pub fn format(&self) -> VpFieldValidity {
        match *self {
            ValidityPeriod::Relative(_) => VpFieldValidity::Relative,
            ValidityPeriod::Absolute(_) => VpFieldValidity::Absolute,
            ValidityPeriod::Enhanced(_) => VpFieldValidity::Enhanced
        }
    }
    /// For relative periods, how long the period actually is.
    ///
    /// - 0 to 143: 5 minute steps, starting at 5 minutes
    /// - 144 to 167: 12 hours, plus 30 minute steps
    /// - 168 to 196: whole days, starting at 2
    /// - 197 to 255: whole weeks, starting at 5
    pub fn duration(&self) -> Option<Duration> {
        let v = match *self {
            ValidityPeriod::Relative(v) => v as i64,
            _ => return None
        };
        Some(match v {
            0..=143 => Duration::minutes((v + 1) * 5),
            144..=167 => Duration::hours(12) + Duration::minutes((v - 143) * 30),
            168..=196 => Duration::days(v - 166),
            _ => Duration::weeks(v - 192)
        })
    }
    pub fn decode(cur: &mut HexCursor, vpf: VpFieldValidity) -> PduResult<Option<Self>> {
        Ok(match vpf {
            VpFieldValidity::None => None,
            VpFieldValidity::Relative => Some(ValidityPeriod::Relative(cur.read_octet()?)),
            VpFieldValidity::Absolute => {
                Some(ValidityPeriod::Absolute(Timestamp::decode(cur)?.to_datetime()?))
            },
            VpFieldValidity::Enhanced => {
                let mut data = [0; 7];
                data.copy_from_slice(&cur.read_bytes(7)?);
                Some(ValidityPeriod::Enhanced(data))
            }
        })
    }
    pub fn encode(&self) -> PduResult<String> {
        match *self {
            ValidityPeriod::Relative(v) => Ok(format!("{:02X}", v)),
            ValidityPeriod::Absolute(ref dt) => encode_date(dt),
            ValidityPeriod::Enhanced(ref data) => Ok(HexData(&data[..]).to_string())
        }
    }
}
/// An SMS-DELIVER: a message received by the phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsDeliver {
    pub smsc: Option<Address>,
    pub header: PduHeader,
    pub sender: Address,
    pub protocol_id: u8,
    pub dcs: DataCodingScheme,
    /// When the SMSC received the message.
    pub timestamp: DateTime<Utc>,
    pub user_data: UserData
}
impl SmsDeliver {
    fn user_data_context(&self) -> UserDataContext {
        UserDataContext {
            encoding: self.dcs.encoding(),
            has_header: self.header.user_data_header
        }
    }
    /// Decode a full PDU (SMSC address first).
    pub fn decode(hex: &str) -> PduResult<Self> {
        let mut cur = HexCursor::new(hex)?;
        let smsc = Address::decode_smsc(&mut cur)?;
        let header = PduHeader::try_from(cur.read_octet()?)?;
        debug!("SMS-DELIVER header: {:?}", header);
        let sender = Address::decode(&mut cur)?;
        let protocol_id = cur.read_octet()?;
        let dcs = DataCodingScheme(cur.read_octet()?);
        debug!("protocol identifier {:#04x}, data coding scheme {:?}", protocol_id, dcs);
        let timestamp = Timestamp::decode(&mut cur)?.to_datetime()?;
        debug!("service centre timestamp: {}", timestamp);
        let ctx = UserDataContext {
            encoding: dcs.encoding(),
            has_header: header.user_data_header
        };
        let user_data = UserData::decode(&mut cur, ctx)?;
        if !cur.is_empty() {
            debug!("ignoring {} hex digits of trailing data", cur.remaining());
        }
        Ok(SmsDeliver { smsc, header, sender, protocol_id, dcs, timestamp, user_data })
    }
    /// Encode as a full PDU (SMSC address first).
    pub fn encode(&self) -> PduResult<String> {
        let mut ret = Address::encode_smsc(self.smsc.as_ref())?;
        ret.push_str(&format!("{:02X}", u8::from(self.header)));
        ret.push_str(&self.sender.encode()?);
        ret.push_str(&format!("{:02X}{:02X}", self.protocol_id, self.dcs.0));
        ret.push_str(&encode_date(&self.timestamp)?);
        ret.push_str(&self.user_data.encode(self.user_data_context())?);
        Ok(ret)
    }
}
impl FromStr for SmsDeliver {
    type Err = PduError;
    fn from_str(st: &str) -> PduResult<Self> {
        Self::decode(st)
    }
}
impl fmt::Display for SmsDeliver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SMS-DELIVER from {} at {}", self.sender, self.timestamp)?;
        if let Some(ref smsc) = self.smsc {
            write!(f, " via {}", smsc)?;
        }
        Ok(())
    }
}
/// An SMS-SUBMIT: a message sent by the phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsSubmit {
    pub smsc: Option<Address>,
    pub header: SubmitHeader,
    pub message_reference: u8,
    pub recipient: Address,
    pub protocol_id: u8,
    pub dcs: DataCodingScheme,
    pub validity_period: Option<ValidityPeriod>,
    pub user_data: UserData
}
impl SmsSubmit {
    fn user_data_context(&self) -> UserDataContext {
        UserDataContext {
            encoding: self.dcs.encoding(),
            has_header: self.header.user_data_header
        }
    }
    /// Decode a full PDU (SMSC address first).
    pub fn decode(hex: &str) -> PduResult<Self> {
        let mut cur = HexCursor::new(hex)?;
        let smsc = Address::decode_smsc(&mut cur)?;
        let header = SubmitHeader::try_from(cur.read_octet()?)?;
        debug!("SMS-SUBMIT header: {:?}", header);
        let message_reference = cur.read_octet()?;
        let recipient = Address::decode(&mut cur)?;
        let protocol_id = cur.read_octet()?;
        let dcs = DataCodingScheme(cur.read_octet()?);
        debug!("protocol identifier {:#04x}, data coding scheme {:?}", protocol_id, dcs);
        let validity_period = ValidityPeriod::decode(&mut cur, header.validity_period_format)?;
        debug!("validity period: {:?}", validity_period);
        let ctx = UserDataContext {
            encoding: dcs.encoding(),
            has_header: header.user_data_header
        };
        let user_data = UserData::decode(&mut cur, ctx)?;
        if !cur.is_empty() {
            debug!("ignoring {} hex digits of trailing data", cur.remaining());
        }
        Ok(SmsSubmit { smsc, header, message_reference, recipient, protocol_id, dcs, validity_period, user_data })
    }
    /// Encode as a full PDU (SMSC address first).
    pub fn encode(&self) -> PduResult<String> {
        let vpf = self.validity_period.as_ref()
            .map(|vp| vp.format())
            .unwrap_or(VpFieldValidity::None);
        if vpf != self.header.validity_period_format {
            return Err(PduError::Validation(format!("validity period format {:?} doesn't match the validity period {:?}", self.header.validity_period_format, self.validity_period)));
        }
        let mut ret = Address::encode_smsc(self.smsc.as_ref())?;
        ret.push_str(&format!("{:02X}{:02X}", u8::from(self.header), self.message_reference));
        ret.push_str(&self.recipient.encode()?);
        ret.push_str(&format!("{:02X}{:02X}", self.protocol_id, self.dcs.0));
        if let Some(ref vp) = self.validity_period {
            ret.push_str(&vp.encode()?);
        }
        ret.push_str(&self.user_data.encode(self.user_data_context())?);
        Ok(ret)
    }
    /// Length of the TPDU in octets, i.e. not counting the SMSC address. This is what `AT+CMGS`
    /// wants to be told.
    pub fn tpdu_len(&self) -> PduResult<usize> {
        let smsc = Address::encode_smsc(self.smsc.as_ref())?;
        Ok((self.encode()?.len() - smsc.len()) / 2)
    }
    pub fn set_smsc(&mut self, smsc: Address) {
        self.smsc = Some(smsc);
    }
    /// Make the SMS-SUBMIT messages needed to send `text` to `recipient`.
    ///
    /// Text that fits in one message gives one message. Anything longer is split into parts of a
    /// concatenated message, which share a randomly chosen reference.
    pub fn make_messages(recipient: Address, text: &str) -> PduResult<Vec<SmsSubmit>> {
        let (encoding, parts) = split_message(text)?;
        if parts.len() > 0xFF {
            return Err(PduError::Validation(format!("message needs {} parts, which is too many", parts.len())));
        }
        let reference = if parts.len() > 1 {
            rand::random::<u8>()
        }
        else {
            0
        };
        debug!("sending {} part(s) as {:?}, reference {}", parts.len(), encoding, reference);
        let count = parts.len() as u8;
        Ok(parts.into_iter()
            .enumerate()
            .map(|(i, part)| {
                let header = if count > 1 {
                    Some(UserDataHeader {
                        elements: vec![InformationElement::concatenated_8bit(reference, count, i as u8 + 1)]
                    })
                }
                else {
                    None
                };
                SmsSubmit {
                    smsc: None,
                    header: SubmitHeader {
                        user_data_header: header.is_some(),
                        ..Default::default()
                    },
                    message_reference: 0,
                    recipient: recipient.clone(),
                    protocol_id: 0,
                    dcs: DataCodingScheme::from(encoding),
                    validity_period: None,
                    user_data: UserData {
                        header,
                        content: Content::Text(part)
                    }
                }
            })
            .collect())
    }
}
impl FromStr for SmsSubmit {
    type Err = PduError;
    fn from_str(st: &str) -> PduResult<Self> {
        Self::decode(st)
    }
}
impl fmt::Display for SmsSubmit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SMS-SUBMIT to {} (reference {})", self.recipient, self.message_reference)
    }
}
/// Decode an SMS-DELIVER PDU.
pub fn decode_sms_deliver(hex: &str) -> PduResult<SmsDeliver> {
    SmsDeliver::decode(hex)
}
/// Decode an SMS-SUBMIT PDU.
pub fn decode_sms_submit(hex: &str) -> PduResult<SmsSubmit> {
    SmsSubmit::decode(hex)
}
#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use crate::gsm_encoding::udh::ConcatenatedSms;

    const DEVELOPERSHOME: &str = "07911326040000F0040B911346610089F60000208062917314080CC8F71D14969741F977FD07";

    #[test]
    fn pdu_header() {
        let h = PduHeader::try_from(0x44).unwrap();
        assert_eq!(h, PduHeader {
            reply_path: false,
            user_data_header: true,
            status_report_indication: false,
            loop_prevention: false,
            more_messages_to_send: true,
            message_type: MessageType::Deliver
        });
        assert_eq!(u8::from(h), 0x44);
        assert_eq!(PduHeader::try_from(0x02).unwrap().message_type, MessageType::StatusReport);
        assert!(PduHeader::try_from(0x03).unwrap_err().is_validation());
    }
    #[test]
    fn submit_header() {
        let h = SubmitHeader::try_from(0x19).unwrap();
        assert_eq!(h.validity_period_format, VpFieldValidity::Absolute);
        assert_eq!(h.message_type, SubmitMessageType::Submit);
        assert_eq!(u8::from(h), 0x19);
        assert_eq!(SubmitHeader::try_from(0x11).unwrap().validity_period_format, VpFieldValidity::Relative);
        assert_eq!(SubmitHeader::try_from(0x09).unwrap().validity_period_format, VpFieldValidity::Enhanced);
        assert!(SubmitHeader::try_from(0x25).unwrap().reject_duplicates);
        assert!(SubmitHeader::try_from(0x23).unwrap_err().is_validation());
        assert_eq!(u8::from(SubmitHeader::default()), 0x01);
    }
    #[test]
    fn data_coding_scheme() {
        assert_eq!(DataCodingScheme(0x00).encoding(), MessageEncoding::Gsm7Bit);
        assert_eq!(DataCodingScheme(0x08).encoding(), MessageEncoding::Ucs2);
        assert_eq!(DataCodingScheme(0xF5).encoding(), MessageEncoding::Binary);
        // reserved encoding bits
        assert_eq!(DataCodingScheme(0x0C).encoding(), MessageEncoding::Gsm7Bit);
        assert_eq!(DataCodingScheme(0x00).class(), None);
        assert_eq!(DataCodingScheme(0x10).class(), Some(MessageClass::Flash));
        assert_eq!(DataCodingScheme(0x1A).class(), Some(MessageClass::Sim));
        assert_eq!(DataCodingScheme(0xF5).class(), Some(MessageClass::MobileEquipment));
        assert_eq!(DataCodingScheme(0xC1).class(), None);
        assert_eq!(DataCodingScheme::from(MessageEncoding::Ucs2), DataCodingScheme(0x08));
    }
    #[test]
    fn relative_validity() {
        let d = |v| ValidityPeriod::Relative(v).duration().unwrap();
        assert_eq!(d(0), Duration::minutes(5));
        assert_eq!(d(143), Duration::hours(12));
        assert_eq!(d(144), Duration::hours(12) + Duration::minutes(30));
        assert_eq!(d(167), Duration::hours(24));
        assert_eq!(d(168), Duration::days(2));
        assert_eq!(d(0xAA), Duration::days(4));
        assert_eq!(d(196), Duration::days(30));
        assert_eq!(d(197), Duration::weeks(5));
        assert_eq!(d(255), Duration::weeks(63));
        assert_eq!(ValidityPeriod::Enhanced([0; 7]).duration(), None);
    }
    #[test]
    fn deliver() {
        let sms = decode_sms_deliver(DEVELOPERSHOME).unwrap();
        assert_eq!(sms.smsc.as_ref().map(|x| x.to_string()), Some("+31624000000".into()));
        assert_eq!(sms.sender.to_string(), "+31641600986");
        assert_eq!(sms.header.message_type, MessageType::Deliver);
        assert!(sms.header.more_messages_to_send);
        assert_eq!(sms.protocol_id, 0);
        assert_eq!(sms.timestamp, Utc.with_ymd_and_hms(2002, 8, 26, 19, 37, 41).unwrap());
        assert_eq!(sms.user_data.content, Content::Text("How are you?".into()));
        assert_eq!(sms.to_string(), "SMS-DELIVER from +31641600986 at 2002-08-26 19:37:41 UTC via +31624000000");
    }
    #[test]
    fn deliver_encode() {
        let sms: SmsDeliver = DEVELOPERSHOME.parse().unwrap();
        // the timestamp goes back out in UTC
        let encoded = sms.encode().unwrap();
        assert_eq!(encoded, "07911326040000F0040B911346610089F60000208062917314000CC8F71D14969741F977FD07");
        assert_eq!(decode_sms_deliver(&encoded).unwrap(), sms);
    }
    #[test]
    fn deliver_trailing_data() {
        let sms = decode_sms_deliver(&format!("{}FFFF", DEVELOPERSHOME)).unwrap();
        assert_eq!(sms.user_data.content.text(), Some("How are you?"));
    }
    #[test]
    fn deliver_truncated() {
        for end in (0..DEVELOPERSHOME.len() - 2).step_by(2) {
            assert!(decode_sms_deliver(&DEVELOPERSHOME[..end]).unwrap_err().is_malformed_input());
        }
        assert!(decode_sms_deliver("0").unwrap_err().is_malformed_input());
    }
    #[test]
    fn submit_relative() {
        let sms = decode_sms_submit("0011000B916407281553F80000AA0AE8329BFD4697D9EC37").unwrap();
        assert_eq!(sms.smsc, None);
        assert_eq!(sms.recipient.to_string(), "+46708251358");
        assert_eq!(sms.validity_period, Some(ValidityPeriod::Relative(0xAA)));
        assert_eq!(sms.user_data.content.text(), Some("hellohello"));
        assert_eq!(sms.encode().unwrap(), "0011000B916407281553F80000AA0AE8329BFD4697D9EC37");
        assert_eq!(sms.tpdu_len().unwrap(), 23);
    }
    #[test]
    fn submit_absolute() {
        let hex = "0791447758100650192A0A81602143658700003270402103000010CD72990E0AD3411B94FBFD766F52";
        let sms = decode_sms_submit(hex).unwrap();
        assert_eq!(sms.smsc.as_ref().map(|x| x.number.as_str()), Some("447785016005"));
        assert_eq!(sms.message_reference, 0x2A);
        assert_eq!(sms.recipient.to_string(), "0612345678");
        assert_eq!(sms.validity_period, Some(ValidityPeriod::Absolute(Utc.with_ymd_and_hms(2023, 7, 4, 12, 30, 0).unwrap())));
        assert_eq!(sms.user_data.content.text(), Some("Meet at {noon}"));
        assert_eq!(sms.encode().unwrap(), hex);
        assert_eq!(sms.tpdu_len().unwrap(), (hex.len() - 16) / 2);
    }
    #[test]
    fn submit_vpf_mismatch() {
        let mut sms = decode_sms_submit("0011000B916407281553F80000AA0AE8329BFD4697D9EC37").unwrap();
        sms.validity_period = None;
        assert!(sms.encode().unwrap_err().is_validation());
        sms.header.validity_period_format = VpFieldValidity::None;
        assert_eq!(sms.encode().unwrap(), "0001000B916407281553F800000AE8329BFD4697D9EC37");
    }
    #[test]
    fn make_single_message() {
        let recipient: Address = "+46708251358".parse().unwrap();
        let msgs = SmsSubmit::make_messages(recipient.clone(), "hellohello").unwrap();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].encode().unwrap(), "0001000B916407281553F800000AE8329BFD4697D9EC37");
        let mut msg = msgs[0].clone();
        msg.set_smsc("+31624000000".parse().unwrap());
        assert_eq!(msg.encode().unwrap(), "07911326040000F001000B916407281553F800000AE8329BFD4697D9EC37");
        assert_eq!(msg.tpdu_len().unwrap(), msgs[0].tpdu_len().unwrap());
        let msgs = SmsSubmit::make_messages(recipient, "ok 😀").unwrap();
        assert_eq!(msgs[0].dcs.encoding(), MessageEncoding::Ucs2);
    }
    #[test]
    fn make_concatenated_messages() {
        let recipient: Address = "+46708251358".parse().unwrap();
        let text = "0123456789".repeat(20);
        let msgs = SmsSubmit::make_messages(recipient, &text).unwrap();
        assert_eq!(msgs.len(), 2);
        let reference = msgs[0].user_data.header.as_ref().and_then(|h| h.concatenated_sms()).unwrap().reference;
        let mut reassembled = String::new();
        for (i, msg) in msgs.iter().enumerate() {
            assert!(msg.header.user_data_header);
            let decoded = decode_sms_submit(&msg.encode().unwrap()).unwrap();
            assert_eq!(&decoded, msg);
            let concat = decoded.user_data.header.as_ref().and_then(|h| h.concatenated_sms()).unwrap();
            assert_eq!(concat, ConcatenatedSms { reference, parts: 2, sequence: i as u8 + 1 });
            reassembled.push_str(decoded.user_data.content.text().unwrap());
        }
        assert_eq!(reassembled, text);
    }
}
