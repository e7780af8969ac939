use crate::error::ParseError;
use crate::property::hex;

const FIELD: &str = "wfd_3d_video_formats";

/// One 3D H.264 codec capability entry. Unlike the 2D entry, the
/// CEA/VESA/HH support bitmaps are packed into a single 64-bit
/// `video_capability_3d` field (matches the reference implementation's
/// `formats3d.cpp`, which emits one `MAKE_HEX_STRING_16`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H264Codec3d {
    pub profile: u8,
    pub level: u8,
    pub video_capability_3d: u64,
    pub latency: u8,
    pub min_slice_size: u16,
    pub slice_enc_params: u16,
    pub frame_rate_control_support: u8,
    pub max_hres: Option<u16>,
    pub max_vres: Option<u16>,
}

impl H264Codec3d {
    pub fn to_wire(&self) -> String {
        let opt = |v: Option<u16>| match v {
            Some(v) => hex::encode(v as u64, 4),
            None => "none".to_string(),
        };
        format!(
            "{} {} {} {} {} {} {} {} {}",
            hex::encode(self.profile as u64, 2),
            hex::encode(self.level as u64, 2),
            hex::encode(self.video_capability_3d, 16),
            hex::encode(self.latency as u64, 2),
            hex::encode(self.min_slice_size as u64, 4),
            hex::encode(self.slice_enc_params as u64, 4),
            hex::encode(self.frame_rate_control_support as u64, 2),
            opt(self.max_hres),
            opt(self.max_vres),
        )
    }

    pub fn parse(entry: &str) -> Result<H264Codec3d, ParseError> {
        let tokens: Vec<&str> = entry.split_whitespace().collect();
        if tokens.len() != 9 {
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
        Ok(H264Codec3d {
            profile: hex::decode_u8(tokens[0], FIELD)?,
            level: hex::decode_u8(tokens[1], FIELD)?,
            video_capability_3d: hex::decode(tokens[2], 16, FIELD)?,
            latency: hex::decode_u8(tokens[3], FIELD)?,
            min_slice_size: hex::decode_u16(tokens[4], FIELD)?,
            slice_enc_params: hex::decode_u16(tokens[5], FIELD)?,
            frame_rate_control_support: hex::decode_u8(tokens[6], FIELD)?,
            max_hres: opt_u16(tokens[7])?,
            max_vres: opt_u16(tokens[8])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFormats3d {
    pub native: u8,
    pub preferred_display_mode: u8,
    pub h264_codecs_3d: Vec<H264Codec3d>,
}

impl VideoFormats3d {
    pub fn to_wire(&self) -> String {
        let codecs = self
            .h264_codecs_3d
            .iter()
            .map(H264Codec3d::to_wire)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} {} {}",
            hex::encode(self.native as u64, 2),
            hex::encode(self.preferred_display_mode as u64, 2),
            codecs
        )
    }

    pub fn parse(value: &str) -> Result<VideoFormats3d, ParseError> {
        let mut parts = value.splitn(3, ' ');
        let bad = || ParseError::Property {
            name: FIELD.to_string(),
            value: value.to_string(),
        };
        let native_token = parts.next().ok_or_else(bad)?;
        let mode_token = parts.next().ok_or_else(bad)?;
        let rest = parts.next().ok_or_else(bad)?;
        let h264_codecs_3d = rest
            .split(", ")
            .map(H264Codec3d::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(VideoFormats3d {
            native: hex::decode_u8(native_token, FIELD)?,
            preferred_display_mode: hex::decode_u8(mode_token, FIELD)?,
            h264_codecs_3d,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let vf = VideoFormats3d {
            native: 0x00,
            preferred_display_mode: 0x00,
            h264_codecs_3d: vec![H264Codec3d {
                profile: 0x01,
                level: 0x02,
                video_capability_3d: 0x0000_0001_0000_0003,
                latency: 0,
                min_slice_size: 0,
                slice_enc_params: 0,
                frame_rate_control_support: 0,
                max_hres: None,
                max_vres: None,
            }],
        };
        let wire = vf.to_wire();
        assert_eq!(VideoFormats3d::parse(&wire).unwrap(), vf);
    }
}
