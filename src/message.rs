//! The tagged message model: one variant per WFD method plus `Reply`
//! (spec section 3). Grounded on `play.cpp`'s per-method `to_string()`
//! (method keyword + request line, headers delegated to a shared routine)
//! and `reply.cpp` (status line always uses the literal reason `OK`).

use crate::header::Header;
use crate::payload::Payload;

pub const RTSP_VERSION: &str = "RTSP/1.0";

/// A parsed or to-be-serialized WFD message.
///
/// Every request variant carries the same three fields (`header`, `payload`,
/// `request_uri`); `Reply` carries a numeric status code instead of a
/// request URI. This mirrors the sender/receiver split in
/// `wfd_session_state.cpp`, where every request handler produces exactly
/// one of these and consumes exactly one `Reply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Options { header: Header, payload: Payload, request_uri: String },
    GetParameter { header: Header, payload: Payload, request_uri: String },
    SetParameter { header: Header, payload: Payload, request_uri: String },
    Setup { header: Header, payload: Payload, request_uri: String },
    Play { header: Header, payload: Payload, request_uri: String },
    Pause { header: Header, payload: Payload, request_uri: String },
    Teardown { header: Header, payload: Payload, request_uri: String },
    Reply { header: Header, payload: Payload, response_code: u16 },
}

impl Message {
    /// The RTSP method keyword, or `None` for a reply.
    pub fn method(&self) -> Option<&'static str> {
        match self {
            Message::Options { .. } => Some("OPTIONS"),
            Message::GetParameter { .. } => Some("GET_PARAMETER"),
            Message::SetParameter { .. } => Some("SET_PARAMETER"),
            Message::Setup { .. } => Some("SETUP"),
            Message::Play { .. } => Some("PLAY"),
            Message::Pause { .. } => Some("PAUSE"),
            Message::Teardown { .. } => Some("TEARDOWN"),
            Message::Reply { .. } => None,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            Message::Options { header, .. }
            | Message::GetParameter { header, .. }
            | Message::SetParameter { header, .. }
            | Message::Setup { header, .. }
            | Message::Play { header, .. }
            | Message::Pause { header, .. }
            | Message::Teardown { header, .. }
            | Message::Reply { header, .. } => header,
        }
    }

    pub fn header_mut(&mut self) -> &mut Header {
        match self {
            Message::Options { header, .. }
            | Message::GetParameter { header, .. }
            | Message::SetParameter { header, .. }
            | Message::Setup { header, .. }
            | Message::Play { header, .. }
            | Message::Pause { header, .. }
            | Message::Teardown { header, .. }
            | Message::Reply { header, .. } => header,
        }
    }

    pub fn payload(&self) -> &Payload {
        match self {
            Message::Options { payload, .. }
            | Message::GetParameter { payload, .. }
            | Message::SetParameter { payload, .. }
            | Message::Setup { payload, .. }
            | Message::Play { payload, .. }
            | Message::Pause { payload, .. }
            | Message::Teardown { payload, .. }
            | Message::Reply { payload, .. } => payload,
        }
    }

    pub fn cseq(&self) -> Option<i64> {
        self.header().cseq
    }

    pub fn is_reply(&self) -> bool {
        matches!(self, Message::Reply { .. })
    }

    /// The request line (method + URI + version) for a request, or the
    /// status line for a reply. `reply.cpp` always spells the reason
    /// phrase as the literal `OK`, never a real status text.
    pub fn start_line(&self) -> String {
        match self {
            Message::Reply { response_code, .. } => {
                format!("{RTSP_VERSION} {response_code} OK")
            }
            _ => {
                let method = self.method().expect("non-reply has a method");
                let uri = self.request_uri().expect("non-reply has a request_uri");
                format!("{method} {uri} {RTSP_VERSION}")
            }
        }
    }

    pub fn request_uri(&self) -> Option<&str> {
        match self {
            Message::Options { request_uri, .. }
            | Message::GetParameter { request_uri, .. }
            | Message::SetParameter { request_uri, .. }
            | Message::Setup { request_uri, .. }
            | Message::Play { request_uri, .. }
            | Message::Pause { request_uri, .. }
            | Message::Teardown { request_uri, .. } => Some(request_uri.as_str()),
            Message::Reply { .. } => None,
        }
    }

    pub fn reply(cseq: i64, response_code: u16) -> Message {
        let mut header = Header::new();
        header.cseq = Some(cseq);
        Message::Reply { header, payload: Payload::new(), response_code }
    }
}
