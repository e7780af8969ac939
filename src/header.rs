use std::collections::BTreeMap;

/// `Transport: RTP/AVP/UDP;unicast;client_port=<n>[-<n+1>][;server_port=<n>[-<n+1>]]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportHeader {
    pub client_port: u16,
    pub server_port: u16,
    pub client_supports_rtcp: bool,
    pub server_supports_rtcp: bool,
}

impl TransportHeader {
    pub fn to_wire(&self) -> String {
        let mut s = String::from("RTP/AVP/UDP;unicast;client_port=");
        s.push_str(&self.client_port.to_string());
        if self.client_supports_rtcp {
            s.push('-');
            s.push_str(&(self.client_port + 1).to_string());
        }
        if self.server_port != 0 || self.server_supports_rtcp {
            s.push_str(";server_port=");
            s.push_str(&self.server_port.to_string());
            if self.server_supports_rtcp {
                s.push('-');
                s.push_str(&(self.server_port + 1).to_string());
            }
        }
        s
    }

    pub fn parse(value: &str) -> Option<TransportHeader> {
        let mut header = TransportHeader::default();
        for segment in value.split(';') {
            let segment = segment.trim();
            if let Some(rest) = segment.strip_prefix("client_port=") {
                let (port, rtcp) = parse_port_range(rest)?;
                header.client_port = port;
                header.client_supports_rtcp = rtcp;
            } else if let Some(rest) = segment.strip_prefix("server_port=") {
                let (port, rtcp) = parse_port_range(rest)?;
                header.server_port = port;
                header.server_supports_rtcp = rtcp;
            }
        }
        Some(header)
    }
}

fn parse_port_range(s: &str) -> Option<(u16, bool)> {
    match s.split_once('-') {
        Some((base, _second)) => Some((base.parse().ok()?, true)),
        None => Some((s.parse().ok()?, false)),
    }
}

/// The header block common to every message (spec section 3).
///
/// `extra` holds headers this crate does not recognize, keyed
/// case-insensitively but preserving the original name/value text so they
/// round-trip byte-for-byte (spec invariant I3 / "generic preservation").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub cseq: Option<i64>,
    pub content_length: u32,
    pub content_type: Option<String>,
    pub require_wfd_support: bool,
    pub supported_methods: Vec<String>,
    pub session: Option<String>,
    pub timeout: Option<u32>,
    pub transport: Option<TransportHeader>,
    pub extra: BTreeMap<String, (String, String)>,
}

impl Header {
    pub fn new() -> Header {
        Header::default()
    }

    /// Record an unrecognized header, keyed case-insensitively but storing
    /// the original name and value for round-trip.
    pub fn set_extra(&mut self, name: &str, value: &str) {
        self.extra
            .insert(name.to_ascii_lowercase(), (name.to_string(), value.to_string()));
    }

    pub fn get_extra(&self, name: &str) -> Option<&str> {
        self.extra
            .get(&name.to_ascii_lowercase())
            .map(|(_, v)| v.as_str())
    }
}
