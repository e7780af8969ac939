//! Wire encoding: start line, header block and payload body, tying
//! `Header`/`Payload`/`Property` together into a `Message` (spec section
//! 4.1). Header and property names are matched case-insensitively but
//! always serialized using their canonical spelling (invariant I3);
//! unrecognized header/property names round-trip byte-for-byte via
//! `Header::extra` / `PropertyKey::Generic`.

use crate::error::ParseError;
use crate::header::{Header, TransportHeader};
use crate::message::{Message, RTSP_VERSION};
use crate::payload::Payload;
use crate::property::{Property, PropertyKey, PropertyValue};

const CRLF: &str = "\r\n";
const REQUIRE_TOKEN: &str = "org.wfa.wfd1.0";

enum StartLine {
    Request { method: String, uri: String },
    Reply { code: u16 },
}

fn parse_start_line(line: &str) -> Result<StartLine, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(3, ' ');
    let (a, b, c) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => return Err(ParseError::StartLine(line.to_string())),
    };
    if a == RTSP_VERSION {
        let code: u16 = b.parse().map_err(|_| ParseError::StartLine(line.to_string()))?;
        Ok(StartLine::Reply { code })
    } else if c == RTSP_VERSION {
        Ok(StartLine::Request { method: a.to_string(), uri: b.to_string() })
    } else {
        Err(ParseError::StartLine(line.to_string()))
    }
}

/// Parse the header lines between the start line and the blank line.
/// `lines` must not include the start line or the terminating blank line.
pub fn parse_header(lines: &[&str]) -> Result<Header, ParseError> {
    let mut header = Header::new();
    for raw in lines {
        let raw = raw.trim_end_matches(['\r', '\n']);
        if raw.is_empty() {
            continue;
        }
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader { name: raw.to_string(), value: String::new() })?;
        let name = name.trim();
        let value = value.trim();
        match name.to_ascii_lowercase().as_str() {
            "cseq" => {
                header.cseq = Some(value.parse().map_err(|_| ParseError::MalformedHeader {
                    name: name.to_string(),
                    value: value.to_string(),
                })?);
            }
            "content-length" => {
                header.content_length = value.parse().map_err(|_| ParseError::MalformedHeader {
                    name: name.to_string(),
                    value: value.to_string(),
                })?;
            }
            "content-type" => header.content_type = Some(value.to_string()),
            "require" => header.require_wfd_support = value.eq_ignore_ascii_case(REQUIRE_TOKEN),
            "public" => {
                header.supported_methods =
                    value.split(',').map(|m| m.trim().to_string()).collect();
            }
            "session" => match value.split_once(";timeout=") {
                Some((session, timeout)) => {
                    header.session = Some(session.trim().to_string());
                    header.timeout = Some(timeout.trim().parse().map_err(|_| {
                        ParseError::MalformedHeader { name: name.to_string(), value: value.to_string() }
                    })?);
                }
                None => header.session = Some(value.to_string()),
            },
            "transport" => {
                header.transport = Some(TransportHeader::parse(value).ok_or_else(|| {
                    ParseError::MalformedHeader { name: name.to_string(), value: value.to_string() }
                })?);
            }
            _ => header.set_extra(name, value),
        }
    }
    if header.cseq.is_none() {
        return Err(ParseError::MissingHeader("CSeq"));
    }
    Ok(header)
}

/// Parse a payload body. `is_get_parameter_request` selects the bare
/// name-per-line grammar used by a `GET_PARAMETER` request body; everywhere
/// else a line is either `name: value`, `name: none`, or (in a `303` reply)
/// `name: code[, code...]`, the latter routed into `property_errors`.
pub fn parse_payload(body: &str, is_get_parameter_request: bool) -> Result<Payload, ParseError> {
    let mut payload = Payload::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_get_parameter_request {
            payload.get_parameter_list.push(PropertyKey::parse(line));
            continue;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader { name: line.to_string(), value: String::new() })?;
        let name = name.trim();
        let value = value.trim();
        let key = PropertyKey::parse(name);

        if value.eq_ignore_ascii_case("none") {
            payload.properties.insert(key, PropertyValue::None);
            continue;
        }
        if let Some(codes) = try_parse_error_codes(value) {
            payload.property_errors.insert(key, codes);
            continue;
        }
        let property = match key {
            PropertyKey::Generic(_) => Property::Generic(value.to_string()),
            _ => Property::parse_value(&key, value)?,
        };
        payload.properties.insert(key, PropertyValue::Value(property));
    }
    Ok(payload)
}

/// A payload value is an error-code list, not a property value, when every
/// comma-separated token is a bare decimal number.
fn try_parse_error_codes(value: &str) -> Option<Vec<u16>> {
    let tokens: Vec<&str> = value.split(',').map(str::trim).collect();
    let codes: Option<Vec<u16>> = tokens.iter().map(|t| t.parse().ok()).collect();
    codes.filter(|c| !c.is_empty())
}

fn serialize_header(header: &Header, content_length: usize) -> String {
    let mut out = String::new();
    if let Some(cseq) = header.cseq {
        out.push_str(&format!("CSeq: {cseq}{CRLF}"));
    }
    if header.require_wfd_support {
        out.push_str(&format!("Require: {REQUIRE_TOKEN}{CRLF}"));
    }
    if !header.supported_methods.is_empty() {
        out.push_str(&format!("Public: {}{CRLF}", header.supported_methods.join(", ")));
    }
    if let Some(transport) = &header.transport {
        out.push_str(&format!("Transport: {}{CRLF}", transport.to_wire()));
    }
    if let Some(session) = &header.session {
        match header.timeout {
            Some(timeout) => out.push_str(&format!("Session: {session};timeout={timeout}{CRLF}")),
            None => out.push_str(&format!("Session: {session}{CRLF}")),
        }
    }
    if let Some(content_type) = &header.content_type {
        out.push_str(&format!("Content-Type: {content_type}{CRLF}"));
    }
    for (original_name, value) in header.extra.values() {
        out.push_str(&format!("{original_name}: {value}{CRLF}"));
    }
    out.push_str(&format!("Content-Length: {content_length}{CRLF}"));
    out
}

fn serialize_payload(payload: &Payload, is_get_parameter_request: bool) -> String {
    let mut out = String::new();
    if is_get_parameter_request {
        for key in &payload.get_parameter_list {
            out.push_str(key.canonical_name());
            out.push_str(CRLF);
        }
        return out;
    }
    for (key, value) in &payload.properties {
        let value_text = match value {
            PropertyValue::None => "none".to_string(),
            PropertyValue::Value(property) => property.value_to_wire(),
        };
        out.push_str(&format!("{}: {}{CRLF}", key.canonical_name(), value_text));
    }
    for (key, codes) in &payload.property_errors {
        let codes_text = codes.iter().map(u16::to_string).collect::<Vec<_>>().join(", ");
        out.push_str(&format!("{}: {}{CRLF}", key.canonical_name(), codes_text));
    }
    out
}

/// Serialize a complete message to wire bytes, computing `Content-Length`
/// from the actual serialized body rather than trusting `header.content_length`.
pub fn serialize(message: &Message) -> Vec<u8> {
    let is_get_parameter_request = matches!(message, Message::GetParameter { .. });
    let body = serialize_payload(message.payload(), is_get_parameter_request);
    let header_block = serialize_header(message.header(), body.len());
    let mut out = String::new();
    out.push_str(&message.start_line());
    out.push_str(CRLF);
    out.push_str(&header_block);
    out.push_str(CRLF);
    out.push_str(&body);
    out.into_bytes()
}

/// Parse a complete framed message (header block + body, as delivered by
/// `InputFramer`).
pub fn parse(raw: &[u8]) -> Result<Message, ParseError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| ParseError::StartLine("non-utf8 message".to_string()))?;
    let header_end = text.find(&format!("{CRLF}{CRLF}")).unwrap_or(text.len());
    let (head, body) = text.split_at(header_end);
    let body = body.trim_start_matches(&format!("{CRLF}{CRLF}"));
    let mut lines = head.split(CRLF);
    let start_line = lines.next().ok_or_else(|| ParseError::StartLine(String::new()))?;
    let header_lines: Vec<&str> = lines.collect();
    let header = parse_header(&header_lines)?;

    match parse_start_line(start_line)? {
        StartLine::Reply { code } => {
            let payload = parse_payload(body, false)?;
            Ok(Message::Reply { header, payload, response_code: code })
        }
        StartLine::Request { method, uri } => {
            let is_get_parameter = method.eq_ignore_ascii_case("GET_PARAMETER");
            let payload = parse_payload(body, is_get_parameter)?;
            build_request(&method, header, payload, uri)
        }
    }
}

fn build_request(
    method: &str,
    header: Header,
    payload: Payload,
    request_uri: String,
) -> Result<Message, ParseError> {
    Ok(match method.to_ascii_uppercase().as_str() {
        "OPTIONS" => Message::Options { header, payload, request_uri },
        "GET_PARAMETER" => Message::GetParameter { header, payload, request_uri },
        "SET_PARAMETER" => Message::SetParameter { header, payload, request_uri },
        "SETUP" => Message::Setup { header, payload, request_uri },
        "PLAY" => Message::Play { header, payload, request_uri },
        "PAUSE" => Message::Pause { header, payload, request_uri },
        "TEARDOWN" => Message::Teardown { header, payload, request_uri },
        other => return Err(ParseError::UnknownMethod(other.to_string())),
    })
}
