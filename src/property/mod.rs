//! The WFD payload property catalog: a closed set of typed property kinds
//! with injective textual encodings (spec section 3).

mod audio;
mod content;
mod hex;
mod key;
mod misc;
mod presentation_url;
mod rtp_ports;
mod trigger;
mod uibc;
mod video;
mod video3d;

pub use audio::{AudioCodec, AudioFormat};
pub use content::{ContentProtection, CoupledSink, DisplayEdid, HdcpSpec};
pub use key::PropertyKey;
pub use misc::{AvFormatChangeTiming, I2c, Route};
pub use presentation_url::PresentationUrl;
pub use rtp_ports::ClientRtpPorts;
pub use trigger::TriggerMethod;
pub use uibc::UibcCapability;
pub use video::{H264Codec, VideoFormats};
pub use video3d::{H264Codec3d, VideoFormats3d};

use crate::error::ParseError;

/// A typed catalog value. `Generic` carries the exact text of a property
/// this crate does not model, so it can round-trip byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    AudioCodecs(Vec<AudioCodec>),
    VideoFormats(VideoFormats),
    VideoFormats3d(VideoFormats3d),
    ContentProtection(ContentProtection),
    DisplayEdid(DisplayEdid),
    CoupledSink(CoupledSink),
    ClientRtpPorts(ClientRtpPorts),
    PresentationUrl(PresentationUrl),
    TriggerMethod(TriggerMethod),
    Route(Route),
    I2c(I2c),
    AvFormatChangeTiming(AvFormatChangeTiming),
    ConnectorType(u8),
    StandbyResumeCapability(bool),
    UibcCapability(UibcCapability),
    UibcSetting(bool),
    Generic(String),
}

/// The value attached to a property name in a payload: either a typed
/// value or the `none` sentinel (spec section 3: "present but no value").
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    None,
    Value(Property),
}

impl Property {
    pub fn key(&self) -> PropertyKey {
        match self {
            Property::AudioCodecs(_) => PropertyKey::AudioCodecs,
            Property::VideoFormats(_) => PropertyKey::VideoFormats,
            Property::VideoFormats3d(_) => PropertyKey::VideoFormats3d,
            Property::ContentProtection(_) => PropertyKey::ContentProtection,
            Property::DisplayEdid(_) => PropertyKey::DisplayEdid,
            Property::CoupledSink(_) => PropertyKey::CoupledSink,
            Property::ClientRtpPorts(_) => PropertyKey::ClientRtpPorts,
            Property::PresentationUrl(_) => PropertyKey::PresentationUrl,
            Property::TriggerMethod(_) => PropertyKey::TriggerMethod,
            Property::Route(_) => PropertyKey::Route,
            Property::I2c(_) => PropertyKey::I2c,
            Property::AvFormatChangeTiming(_) => PropertyKey::AvFormatChangeTiming,
            Property::ConnectorType(_) => PropertyKey::ConnectorType,
            Property::StandbyResumeCapability(_) => PropertyKey::StandbyResumeCapability,
            Property::UibcCapability(_) => PropertyKey::UibcCapability,
            Property::UibcSetting(_) => PropertyKey::UibcSetting,
            Property::Generic(_) => unreachable!("Generic values carry their key alongside"),
        }
    }

    /// Serialize the value portion of a payload line (everything after
    /// `name: `).
    pub fn value_to_wire(&self) -> String {
        match self {
            Property::AudioCodecs(codecs) => audio::serialize_list(codecs),
            Property::VideoFormats(v) => v.to_wire(),
            Property::VideoFormats3d(v) => v.to_wire(),
            Property::ContentProtection(v) => v.to_wire(),
            Property::DisplayEdid(v) => v.to_wire(),
            Property::CoupledSink(v) => v.to_wire(),
            Property::ClientRtpPorts(v) => v.to_wire(),
            Property::PresentationUrl(v) => v.to_wire(),
            Property::TriggerMethod(v) => v.as_str().to_string(),
            Property::Route(v) => v.as_str().to_string(),
            Property::I2c(v) => v.to_wire(),
            Property::AvFormatChangeTiming(v) => v.to_wire(),
            Property::ConnectorType(v) => hex::encode(*v as u64, 2),
            Property::StandbyResumeCapability(v) => if *v { "supported" } else { "none" }.to_string(),
            Property::UibcCapability(v) => v.to_wire(),
            Property::UibcSetting(v) => if *v { "enable" } else { "disable" }.to_string(),
            Property::Generic(text) => text.clone(),
        }
    }

    /// Parse the value portion of a payload line for a recognized catalog
    /// key. Callers handle the `none` sentinel before reaching here and
    /// route unrecognized keys to `Generic` without calling this.
    pub fn parse_value(key: &PropertyKey, value: &str) -> Result<Property, ParseError> {
        Ok(match key {
            PropertyKey::AudioCodecs => Property::AudioCodecs(audio::parse_list(value)?),
            PropertyKey::VideoFormats => Property::VideoFormats(VideoFormats::parse(value)?),
            PropertyKey::VideoFormats3d => Property::VideoFormats3d(VideoFormats3d::parse(value)?),
            PropertyKey::ContentProtection => {
                Property::ContentProtection(ContentProtection::parse(value)?)
            }
            PropertyKey::DisplayEdid => Property::DisplayEdid(DisplayEdid::parse(value)?),
            PropertyKey::CoupledSink => Property::CoupledSink(CoupledSink::parse(value)?),
            PropertyKey::ClientRtpPorts => {
                Property::ClientRtpPorts(ClientRtpPorts::parse(value)?)
            }
            PropertyKey::PresentationUrl => {
                Property::PresentationUrl(PresentationUrl::parse(value)?)
            }
            PropertyKey::TriggerMethod => Property::TriggerMethod(TriggerMethod::parse(value)?),
            PropertyKey::Route => Property::Route(Route::parse(value)?),
            PropertyKey::I2c => Property::I2c(I2c::parse(value)?),
            PropertyKey::AvFormatChangeTiming => {
                Property::AvFormatChangeTiming(AvFormatChangeTiming::parse(value)?)
            }
            PropertyKey::ConnectorType => {
                Property::ConnectorType(hex::decode_u8(value, "wfd_connector_type")?)
            }
            PropertyKey::StandbyResumeCapability => {
                Property::StandbyResumeCapability(match value {
                    "supported" => true,
                    _ => {
                        return Err(ParseError::Property {
                            name: "wfd_standby_resume_capability".to_string(),
                            value: value.to_string(),
                        });
                    }
                })
            }
            PropertyKey::UibcCapability => {
                Property::UibcCapability(UibcCapability::parse(value)?)
            }
            PropertyKey::UibcSetting => Property::UibcSetting(match value {
                "enable" => true,
                "disable" => false,
                _ => {
                    return Err(ParseError::Property {
                        name: "wfd_uibc_setting".to_string(),
                        value: value.to_string(),
                    });
                }
            }),
            PropertyKey::Generic(_) => unreachable!("Generic keys bypass parse_value"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connector_type_roundtrip() {
        let p = Property::ConnectorType(0x05);
        let wire = p.value_to_wire();
        let parsed = Property::parse_value(&PropertyKey::ConnectorType, &wire).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn standby_resume_roundtrip() {
        let p = Property::StandbyResumeCapability(true);
        let wire = p.value_to_wire();
        assert_eq!(wire, "supported");
        let parsed =
            Property::parse_value(&PropertyKey::StandbyResumeCapability, &wire).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn uibc_setting_roundtrip() {
        for v in [true, false] {
            let p = Property::UibcSetting(v);
            let wire = p.value_to_wire();
            let parsed = Property::parse_value(&PropertyKey::UibcSetting, &wire).unwrap();
            assert_eq!(parsed, p);
        }
    }
}
