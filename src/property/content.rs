use crate::error::ParseError;
use crate::property::hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HdcpSpec {
    Hdcp20,
    Hdcp21,
}

impl HdcpSpec {
    fn as_str(self) -> &'static str {
        match self {
            HdcpSpec::Hdcp20 => "HDCP2.0",
            HdcpSpec::Hdcp21 => "HDCP2.1",
        }
    }

    fn parse(token: &str) -> Result<HdcpSpec, ParseError> {
        match token {
            "HDCP2.0" => Ok(HdcpSpec::Hdcp20),
            "HDCP2.1" => Ok(HdcpSpec::Hdcp21),
            _ => Err(bad("wfd_content_protection", token)),
        }
    }
}

/// HDCP capability advertisement. Only the spec and listen port are carried;
/// key exchange itself is out of scope (spec.md Non-goals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentProtection {
    pub hdcp_spec: HdcpSpec,
    pub port: u16,
}

impl ContentProtection {
    pub fn to_wire(&self) -> String {
        format!("{} {}", self.hdcp_spec.as_str(), hex::encode(self.port as u64, 4))
    }

    pub fn parse(value: &str) -> Result<ContentProtection, ParseError> {
        let mut parts = value.split_whitespace();
        let spec_token = parts
            .next()
            .ok_or_else(|| bad("wfd_content_protection", value))?;
        let port_token = parts
            .next()
            .ok_or_else(|| bad("wfd_content_protection", value))?;
        if parts.next().is_some() {
            return Err(bad("wfd_content_protection", value));
        }
        Ok(ContentProtection {
            hdcp_spec: HdcpSpec::parse(spec_token)?,
            port: hex::decode_u16(port_token, "wfd_content_protection")?,
        })
    }
}

/// EDID blob: byte length followed by the hex-encoded bytes themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEdid {
    pub payload: Vec<u8>,
}

impl DisplayEdid {
    pub fn to_wire(&self) -> String {
        let hex_body: String = self.payload.iter().map(|b| format!("{b:02x}")).collect();
        format!("{} {}", hex::encode(self.payload.len() as u64, 4), hex_body)
    }

    pub fn parse(value: &str) -> Result<DisplayEdid, ParseError> {
        let mut parts = value.splitn(2, ' ');
        let len_token = parts.next().ok_or_else(|| bad("wfd_display_edid", value))?;
        let body = parts.next().unwrap_or("");
        let len = hex::decode_u16(len_token, "wfd_display_edid")? as usize;
        if body.len() != len * 2 {
            return Err(bad("wfd_display_edid", value));
        }
        let mut payload = Vec::with_capacity(len);
        for i in 0..len {
            let byte = u8::from_str_radix(&body[i * 2..i * 2 + 2], 16)
                .map_err(|_| bad("wfd_display_edid", value))?;
            payload.push(byte);
        }
        Ok(DisplayEdid { payload })
    }
}

/// A coupled (companion) sink address plus its capability bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoupledSink {
    pub sink_address: String,
    pub capability: u8,
}

impl CoupledSink {
    pub fn to_wire(&self) -> String {
        format!("{} {}", self.sink_address, hex::encode(self.capability as u64, 2))
    }

    pub fn parse(value: &str) -> Result<CoupledSink, ParseError> {
        let mut parts = value.split_whitespace();
        let address = parts.next().ok_or_else(|| bad("wfd_coupled_sink", value))?;
        let cap_token = parts.next().ok_or_else(|| bad("wfd_coupled_sink", value))?;
        if parts.next().is_some() {
            return Err(bad("wfd_coupled_sink", value));
        }
        Ok(CoupledSink {
            sink_address: address.to_string(),
            capability: hex::decode_u8(cap_token, "wfd_coupled_sink")?,
        })
    }
}

fn bad(name: &str, value: &str) -> ParseError {
    ParseError::Property {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_protection_roundtrip() {
        let cp = ContentProtection { hdcp_spec: HdcpSpec::Hdcp21, port: 8080 };
        let wire = cp.to_wire();
        assert_eq!(ContentProtection::parse(&wire).unwrap(), cp);
    }

    #[test]
    fn edid_roundtrip() {
        let edid = DisplayEdid { payload: vec![0xDE, 0xAD, 0xBE, 0xEF] };
        let wire = edid.to_wire();
        assert_eq!(wire, "0004 deadbeef");
        assert_eq!(DisplayEdid::parse(&wire).unwrap(), edid);
    }

    #[test]
    fn edid_rejects_length_mismatch() {
        assert!(DisplayEdid::parse("0004 dead").is_err());
    }

    #[test]
    fn coupled_sink_roundtrip() {
        let cs = CoupledSink { sink_address: "00:11:22:33:44:55".to_string(), capability: 0x01 };
        let wire = cs.to_wire();
        assert_eq!(CoupledSink::parse(&wire).unwrap(), cs);
    }
}
