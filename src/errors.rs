//! Error handling.
//!
//! Every fallible operation in this crate returns a `PduResult`. Errors are raised at the point
//! of detection and bubble straight up to the caller; a bad field aborts the whole decode or
//! encode, and no partial results are ever produced.

/// An error encountered while decoding or encoding a PDU.
#[derive(Fail, Debug, Clone, PartialEq, Eq, is_enum_variant)]
pub enum PduError {
    /// Some field had fixed bits set wrong, an enum value that isn't defined, or an enum name
    /// that isn't recognised. Also raised when a record is internally inconsistent on encode
    /// (e.g. the UDHI flag says there's a header, but there isn't one).
    #[fail(display = "Validation failed: {}", _0)]
    Validation(String),
    /// The character can't be represented in the GSM 7-bit alphabet, nor in its extension
    /// table.
    #[fail(display = "Character {:?} can not be encoded with the GSM 7-bit alphabet", _0)]
    Encoding(char),
    /// The input wasn't a well-formed hex string, or ended before the field being read did.
    ///
    /// `offset` is the position (in hex digits) at which the problem was detected.
    #[fail(display = "Malformed input at offset {}: {}", offset, reason)]
    MalformedInput {
        offset: usize,
        reason: &'static str
    }
}
impl PduError {
    pub(crate) fn malformed(offset: usize, reason: &'static str) -> Self {
        PduError::MalformedInput { offset, reason }
    }
}
pub type PduResult<T> = Result<T, PduError>;
