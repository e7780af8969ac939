use crate::error::ParseError;
use crate::property::hex;

/// One of the three audio formats WFD 1.0 defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Lpcm,
    Aac,
    Ac3,
}

impl AudioFormat {
    fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Lpcm => "LPCM",
            AudioFormat::Aac => "AAC",
            AudioFormat::Ac3 => "AC3",
        }
    }

    fn parse(token: &str) -> Result<AudioFormat, ParseError> {
        match token.to_ascii_uppercase().as_str() {
            "LPCM" => Ok(AudioFormat::Lpcm),
            "AAC" => Ok(AudioFormat::Aac),
            "AC3" => Ok(AudioFormat::Ac3),
            _ => Err(ParseError::Property {
                name: "wfd_audio_codecs".to_string(),
                value: token.to_string(),
            }),
        }
    }
}

/// One audio codec entry: format, supported-mode bitmap, latency (in units
/// of 5ms, per WFD 1.0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCodec {
    pub format: AudioFormat,
    pub modes: u32,
    pub latency: u8,
}

impl AudioCodec {
    pub fn to_wire(&self) -> String {
        format!(
            "{} {} {}",
            self.format.as_str(),
            hex::encode(self.modes as u64, 8),
            hex::encode(self.latency as u64, 2)
        )
    }

    pub fn parse(entry: &str) -> Result<AudioCodec, ParseError> {
        let mut parts = entry.split_whitespace();
        let field = "wfd_audio_codecs";
        let format_token = parts.next().ok_or(ParseError::Property {
            name: field.to_string(),
            value: entry.to_string(),
        })?;
        let modes_token = parts.next().ok_or(ParseError::Property {
            name: field.to_string(),
            value: entry.to_string(),
        })?;
        let latency_token = parts.next().ok_or(ParseError::Property {
            name: field.to_string(),
            value: entry.to_string(),
        })?;
        if parts.next().is_some() {
            return Err(ParseError::Property {
                name: field.to_string(),
                value: entry.to_string(),
            });
        }
        Ok(AudioCodec {
            format: AudioFormat::parse(format_token)?,
            modes: hex::decode_u32(modes_token, field)?,
            latency: hex::decode_u8(latency_token, field)?,
        })
    }
}

pub fn serialize_list(codecs: &[AudioCodec]) -> String {
    codecs
        .iter()
        .map(AudioCodec::to_wire)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn parse_list(value: &str) -> Result<Vec<AudioCodec>, ParseError> {
    value.split(", ").map(AudioCodec::parse).collect()
}
