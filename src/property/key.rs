use std::cmp::Ordering;
use std::fmt;

/// Identifies a payload property line by name.
///
/// Recognized names compare case-insensitively when parsing (spec invariant
/// I3) but always serialize using the catalog's canonical lowercase
/// spelling. An unrecognized name is kept verbatim in `Generic` so it can
/// round-trip byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    AudioCodecs,
    VideoFormats,
    VideoFormats3d,
    ContentProtection,
    DisplayEdid,
    CoupledSink,
    ClientRtpPorts,
    PresentationUrl,
    TriggerMethod,
    Route,
    I2c,
    AvFormatChangeTiming,
    ConnectorType,
    StandbyResumeCapability,
    UibcCapability,
    UibcSetting,
    Generic(String),
}

/// The catalog entries in the fixed order spec section 4.1 serializes them
/// in ("properties emitted sorted by name within catalog order").
const CATALOG_ORDER: &[&str] = &[
    "wfd_audio_codecs",
    "wfd_video_formats",
    "wfd_3d_video_formats",
    "wfd_content_protection",
    "wfd_display_edid",
    "wfd_coupled_sink",
    "wfd_client_rtp_ports",
    "wfd_presentation_url",
    "wfd_trigger_method",
    "wfd_route",
    "wfd_i2c",
    "wfd_av_format_change_timing",
    "wfd_connector_type",
    "wfd_standby_resume_capability",
    "wfd_uibc_capability",
    "wfd_uibc_setting",
];

impl PropertyKey {
    /// Canonical lowercase wire name.
    pub fn canonical_name(&self) -> &str {
        match self {
            PropertyKey::AudioCodecs => "wfd_audio_codecs",
            PropertyKey::VideoFormats => "wfd_video_formats",
            PropertyKey::VideoFormats3d => "wfd_3d_video_formats",
            PropertyKey::ContentProtection => "wfd_content_protection",
            PropertyKey::DisplayEdid => "wfd_display_edid",
            PropertyKey::CoupledSink => "wfd_coupled_sink",
            PropertyKey::ClientRtpPorts => "wfd_client_rtp_ports",
            PropertyKey::PresentationUrl => "wfd_presentation_url",
            PropertyKey::TriggerMethod => "wfd_trigger_method",
            PropertyKey::Route => "wfd_route",
            PropertyKey::I2c => "wfd_i2c",
            PropertyKey::AvFormatChangeTiming => "wfd_av_format_change_timing",
            PropertyKey::ConnectorType => "wfd_connector_type",
            PropertyKey::StandbyResumeCapability => "wfd_standby_resume_capability",
            PropertyKey::UibcCapability => "wfd_uibc_capability",
            PropertyKey::UibcSetting => "wfd_uibc_setting",
            PropertyKey::Generic(name) => name,
        }
    }

    /// Parse a property name, matching catalog entries case-insensitively.
    /// Unknown names become `Generic`, preserving the original casing.
    pub fn parse(name: &str) -> PropertyKey {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "wfd_audio_codecs" => PropertyKey::AudioCodecs,
            "wfd_video_formats" => PropertyKey::VideoFormats,
            "wfd_3d_video_formats" => PropertyKey::VideoFormats3d,
            "wfd_content_protection" => PropertyKey::ContentProtection,
            "wfd_display_edid" => PropertyKey::DisplayEdid,
            "wfd_coupled_sink" => PropertyKey::CoupledSink,
            "wfd_client_rtp_ports" => PropertyKey::ClientRtpPorts,
            "wfd_presentation_url" => PropertyKey::PresentationUrl,
            "wfd_trigger_method" => PropertyKey::TriggerMethod,
            "wfd_route" => PropertyKey::Route,
            "wfd_i2c" => PropertyKey::I2c,
            "wfd_av_format_change_timing" => PropertyKey::AvFormatChangeTiming,
            "wfd_connector_type" => PropertyKey::ConnectorType,
            "wfd_standby_resume_capability" => PropertyKey::StandbyResumeCapability,
            "wfd_uibc_capability" => PropertyKey::UibcCapability,
            "wfd_uibc_setting" => PropertyKey::UibcSetting,
            _ => PropertyKey::Generic(name.to_string()),
        }
    }

    fn sort_rank(&self) -> usize {
        match self {
            PropertyKey::Generic(_) => CATALOG_ORDER.len(),
            other => CATALOG_ORDER
                .iter()
                .position(|n| *n == other.canonical_name())
                .unwrap_or(CATALOG_ORDER.len()),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl PartialOrd for PropertyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PropertyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_rank()
            .cmp(&other.sort_rank())
            .then_with(|| self.canonical_name().cmp(other.canonical_name()))
    }
}
