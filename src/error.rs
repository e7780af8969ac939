//! Error types for the WFD message model, codec, framer and session
//! state machine.

/// Failure to parse a start-line or header block.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed start line: {0:?}")]
    StartLine(String),
    #[error("unknown method: {0:?}")]
    UnknownMethod(String),
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),
    #[error("malformed header {name:?}: {value:?}")]
    MalformedHeader { name: String, value: String },
    #[error("recognized property {name:?} has invalid value: {value:?}")]
    Property { name: String, value: String },
}

/// Failure to frame a complete message out of a byte stream.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FramingError {
    #[error("no CRLF CRLF header terminator found within {0} bytes, buffer discarded")]
    Oversize(usize),
    #[error("header claims {claimed} bytes of payload but buffer is truncated")]
    TruncatedPayload { claimed: usize },
}

/// A parsed message that is invalid at the protocol level (valid grammar,
/// wrong place/order).
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("CSeq out of order: got {got}, expected {expected}")]
    CSeq { got: i64, expected: i64 },
    #[error("reply arrived with no outstanding request")]
    UnexpectedReply,
    #[error("message not valid in current state")]
    State,
}

/// The underlying transport failed. The core never interprets the cause,
/// it only knows the connection is no longer usable.
#[derive(Debug, thiserror::Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);
