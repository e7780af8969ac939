use crate::error::ParseError;
use crate::property::hex;

const FIELD: &str = "wfd_video_formats";

/// One H.264 codec capability entry.
///
/// `max_hres`/`max_vres` are absent (encoded as `none`) when the sink does
/// not advertise a resolution ceiling beyond what the CEA/VESA/HH bitmaps
/// already imply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H264Codec {
    pub profile: u8,
    pub level: u8,
    pub cea_support: u32,
    pub vesa_support: u32,
    pub hh_support: u32,
    pub latency: u8,
    pub min_slice_size: u16,
    pub slice_enc_params: u16,
    pub frame_rate_control_support: u8,
    pub max_hres: Option<u16>,
    pub max_vres: Option<u16>,
}

impl H264Codec {
    pub fn to_wire(&self) -> String {
        let opt = |v: Option<u16>| match v {
            Some(v) => hex::encode(v as u64, 4),
            None => "none".to_string(),
        };
        format!(
            "{} {} {} {} {} {} {} {} {} {} {}",
            hex::encode(self.profile as u64, 2),
            hex::encode(self.level as u64, 2),
            hex::encode(self.cea_support as u64, 8),
            hex::encode(self.vesa_support as u64, 8),
            hex::encode(self.hh_support as u64, 8),
            hex::encode(self.latency as u64, 2),
            hex::encode(self.min_slice_size as u64, 4),
            hex::encode(self.slice_enc_params as u64, 4),
            hex::encode(self.frame_rate_control_support as u64, 2),
            opt(self.max_hres),
            opt(self.max_vres),
        )
    }

    pub fn parse(entry: &str) -> Result<H264Codec, ParseError> {
        let tokens: Vec<&str> = entry.split_whitespace().collect();
        if tokens.len() != 11 {
            return Err(ParseError::Property {
                name: FIELD.to_string(),
                value: entry.to_string(),
            });
        }
        let opt_u16 = |token: &str| -> Result<Option<u16>, ParseError> {
            if token.eq_ignore_ascii_case("none") {
                Ok(None)
            } else {
                Ok(Some(hex::decode_u16(token, FIELD)?))
            }
        };
        Ok(H264Codec {
            profile: hex::decode_u8(tokens[0], FIELD)?,
            level: hex::decode_u8(tokens[1], FIELD)?,
            cea_support: hex::decode_u32(tokens[2], FIELD)?,
            vesa_support: hex::decode_u32(tokens[3], FIELD)?,
            hh_support: hex::decode_u32(tokens[4], FIELD)?,
            latency: hex::decode_u8(tokens[5], FIELD)?,
            min_slice_size: hex::decode_u16(tokens[6], FIELD)?,
            slice_enc_params: hex::decode_u16(tokens[7], FIELD)?,
            frame_rate_control_support: hex::decode_u8(tokens[8], FIELD)?,
            max_hres: opt_u16(tokens[9])?,
            max_vres: opt_u16(tokens[10])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFormats {
    pub native: u8,
    pub preferred_display_mode: u8,
    pub h264_codecs: Vec<H264Codec>,
}

impl VideoFormats {
    pub fn to_wire(&self) -> String {
        let codecs = self
            .h264_codecs
            .iter()
            .map(H264Codec::to_wire)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} {} {}",
            hex::encode(self.native as u64, 2),
            hex::encode(self.preferred_display_mode as u64, 2),
            codecs
        )
    }

    pub fn parse(value: &str) -> Result<VideoFormats, ParseError> {
        let mut parts = value.splitn(3, ' ');
        let native_token = parts.next().ok_or_else(|| bad(value))?;
        let mode_token = parts.next().ok_or_else(|| bad(value))?;
        let rest = parts.next().ok_or_else(|| bad(value))?;
        let h264_codecs = rest
            .split(", ")
            .map(H264Codec::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(VideoFormats {
            native: hex::decode_u8(native_token, FIELD)?,
            preferred_display_mode: hex::decode_u8(mode_token, FIELD)?,
            h264_codecs,
        })
    }
}

fn bad(value: &str) -> ParseError {
    ParseError::Property {
        name: FIELD.to_string(),
        value: value.to_string(),
    }
}
