//! Reading SMS messages without caring about the details of the PDU.
//!
//! `read_incoming_sms` and `read_outgoing_sms` boil a PDU down to the parts you'd show a user:
//! who it's from (or to), when, what it says, and which part of a concatenated message it is.
//! Parts of the same concatenated message have the same `PartialInfo::key`, and can be put back
//! together by sorting on `part_number`.
use chrono::{DateTime, Utc};
use crate::errors::*;
use crate::gsm_encoding::udh::UserDataHeader;
use crate::pdu::{SmsDeliver, SmsSubmit};
use crate::pdu::user_data::Content;

/// Where a message fits in a concatenated message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PartialInfo {
    /// Reference shared by all parts of the message.
    pub reference: u16,
    /// How many parts there are.
    pub parts_count: u8,
    /// Which part this is, starting at 1.
    pub part_number: u8
}
impl PartialInfo {
    fn from_header(header: Option<&UserDataHeader>) -> Option<Self> {
        header.and_then(|h| h.concatenated_sms())
            .map(|c| PartialInfo {
                reference: c.reference,
                parts_count: c.parts,
                part_number: c.sequence
            })
    }
    /// Key identifying the whole message this is part of.
    pub fn key(&self) -> String {
        format!("{}-{}", self.reference, self.parts_count)
    }
}
/// A received message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingSms {
    /// The sender, with a `+` in front for international numbers.
    pub sender: String,
    pub date: DateTime<Utc>,
    pub content: Content,
    pub partial: Option<PartialInfo>
}
/// A sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingSms {
    /// The recipient, with a `+` in front for international numbers.
    pub recipient: String,
    pub content: Content,
    pub partial: Option<PartialInfo>
}
/// Read an SMS-DELIVER PDU.
///
/// ```
/// let sms = smspdu::read_incoming_sms("07911326040000F0040B911346610089F60000208062917314080CC8F71D14969741F977FD07").unwrap();
/// assert_eq!(sms.sender, "+31641600986");
/// assert_eq!(sms.content.text(), Some("How are you?"));
/// assert!(sms.partial.is_none());
/// ```
pub fn read_incoming_sms(hex: &str) -> PduResult<IncomingSms> {
    let sms = SmsDeliver::decode(hex)?;
    Ok(IncomingSms {
        sender: sms.sender.to_string(),
        date: sms.timestamp,
        partial: PartialInfo::from_header(sms.user_data.header.as_ref()),
        content: sms.user_data.content
    })
}
/// Read an SMS-SUBMIT PDU.
pub fn read_outgoing_sms(hex: &str) -> PduResult<OutgoingSms> {
    let sms = SmsSubmit::decode(hex)?;
    Ok(OutgoingSms {
        recipient: sms.recipient.to_string(),
        partial: PartialInfo::from_header(sms.user_data.header.as_ref()),
        content: sms.user_data.content
    })
}
