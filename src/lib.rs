//! The `smspdu` library decodes and encodes SMS messages in *PDU mode*, the hex-string format
//! that GSM modems hand back from `AT+CMGL`/`AT+CMGR` and expect in `AT+CMGS` (GSM 03.40), along
//! with the GSM 7-bit alphabet (GSM 03.38) and UCS2 text encodings they use.
//!
//! Most people will just want `read_incoming_sms`, which turns a received PDU into a sender, a
//! date and some text. The `pdu` module has the full SMS-DELIVER and SMS-SUBMIT types, if you
//! need every field (or want to build PDUs for sending, with `SmsSubmit::make_messages`).
//!
//! All of the codecs work on uppercase hex strings (lowercase is accepted on input), and report
//! failures as a `PduError`.

#[macro_use] extern crate log;
#[macro_use] extern crate failure_derive;
#[macro_use] extern crate derive_is_enum_variant;
#[macro_use] extern crate num_derive;

pub mod errors;
pub mod util;
pub mod cursor;
pub mod gsm_encoding;
pub mod pdu;
pub mod sms;

pub use crate::errors::{PduError, PduResult};
pub use crate::util::{reverse_octets, swap_nibbles};
pub use crate::gsm_encoding::{decode_gsm7, encode_gsm7, decode_ucs2, encode_ucs2};
pub use crate::pdu::{SmsDeliver, SmsSubmit, decode_sms_deliver, decode_sms_submit};
pub use crate::pdu::address::{decode_number, encode_number,
                              decode_type_of_address, encode_type_of_address};
pub use crate::pdu::timestamp::{decode_date, encode_date, encode_naive_date};
pub use crate::sms::{read_incoming_sms, read_outgoing_sms};
