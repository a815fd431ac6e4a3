//! Service centre timestamps (and absolute validity periods), as seven semi-octet fields.
//!
//! The first six fields are nibble-swapped BCD: year (from 2000), month, day, hour, minute,
//! second. The seventh is the offset from UTC in quarter-hours, with bit 7 (after swapping the
//! nibbles) set for offsets west of Greenwich.
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset,
             TimeZone, Timelike, Utc};
use crate::cursor::HexCursor;
use crate::errors::*;
use crate::util::{hex_value, swap_nibbles};

/// Length of a timestamp, in octets.
pub const TIMESTAMP_OCTETS: usize = 7;

/// A timestamp as it appears on the wire: local time fields plus the offset they're in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timestamp {
    /// Years since 2000.
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from UTC, in quarter-hours.
    pub timezone: i8
}
fn decode_bcd(digits: &[u8]) -> PduResult<u8> {
    if !digits.iter().all(|c| c.is_ascii_digit()) {
        return Err(PduError::Validation(format!("invalid BCD digits {:?} in timestamp", String::from_utf8_lossy(digits))));
    }
    Ok(digits.iter().fold(0, |acc, c| acc * 10 + (c - b'0')))
}
impl Timestamp {
    pub fn decode(cur: &mut HexCursor) -> PduResult<Self> {
        let swapped = swap_nibbles(cur.read_octets(TIMESTAMP_OCTETS)?);
        let b = swapped.as_bytes();
        let tz = (hex_value(b[12]) << 4) | hex_value(b[13]);
        let mut timezone = (tz & 0b0111_1111) as i8;
        if tz & 0b1000_0000 != 0 {
            timezone = -timezone;
        }
        Ok(Timestamp {
            year: decode_bcd(&b[0..2])?,
            month: decode_bcd(&b[2..4])?,
            day: decode_bcd(&b[4..6])?,
            hour: decode_bcd(&b[6..8])?,
            minute: decode_bcd(&b[8..10])?,
            second: decode_bcd(&b[10..12])?,
            timezone
        })
    }
    pub fn encode(&self) -> String {
        let mut tz = (self.timezone as i16).abs() as u8 & 0b0111_1111;
        if self.timezone < 0 {
            tz |= 0b1000_0000;
        }
        let data = format!("{:02}{:02}{:02}{:02}{:02}{:02}{:02X}",
                           self.year, self.month, self.day,
                           self.hour, self.minute, self.second, tz);
        swap_nibbles(&data)
    }
    /// The instant this timestamp refers to.
    pub fn to_datetime(&self) -> PduResult<DateTime<Utc>> {
        let naive = NaiveDate::from_ymd_opt(2000 + self.year as i32, self.month as u32, self.day as u32)
            .and_then(|d| d.and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32))
            .ok_or_else(|| PduError::Validation(format!("impossible date in timestamp: {:?}", self)))?;
        let offset = FixedOffset::east_opt(self.timezone as i32 * 15 * 60)
            .ok_or_else(|| PduError::Validation(format!("invalid timezone {} in timestamp", self.timezone)))?;
        let local = offset.from_local_datetime(&naive)
            .single()
            .ok_or_else(|| PduError::Validation(format!("ambiguous local time in timestamp: {:?}", self)))?;
        Ok(local.with_timezone(&Utc))
    }
    /// Express `dt` in its own UTC offset, truncated to whole quarter-hours.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> PduResult<Self> {
        let quarters = dt.offset().fix().local_minus_utc() / (15 * 60);
        let local = dt.naive_utc() + Duration::seconds(quarters as i64 * 15 * 60);
        if local.year() < 2000 || local.year() > 2099 {
            return Err(PduError::Validation(format!("year {} can't be represented in a timestamp", local.year())));
        }
        Ok(Timestamp {
            year: (local.year() - 2000) as u8,
            month: local.month() as u8,
            day: local.day() as u8,
            hour: local.hour() as u8,
            minute: local.minute() as u8,
            second: local.second() as u8,
            timezone: quarters as i8
        })
    }
}
/// Decode a 14-digit timestamp into a UTC instant.
///
/// ```
/// let date = smspdu::decode_date("111011315214C0").unwrap();
/// assert_eq!(date.to_rfc3339(), "2011-01-11T10:25:41+00:00");
/// ```
pub fn decode_date(hex: &str) -> PduResult<DateTime<Utc>> {
    let mut cur = HexCursor::new(hex)?;
    let ts = Timestamp::decode(&mut cur)?;
    if !cur.is_empty() {
        return Err(PduError::malformed(cur.position(), "timestamp is longer than 7 octets"));
    }
    ts.to_datetime()
}
/// Encode a date in its own UTC offset.
pub fn encode_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> PduResult<String> {
    Ok(Timestamp::from_datetime(dt)?.encode())
}
/// Encode a date without an offset, taking it to be in UTC.
pub fn encode_naive_date(dt: &NaiveDateTime) -> PduResult<String> {
    encode_date(&Utc.from_utc_datetime(dt))
}
