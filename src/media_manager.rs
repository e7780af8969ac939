//! The media pipeline contract (spec section 1: `MediaPipeline` is an
//! external collaborator). Grounded on
//! `examples/original_source/wfd_parser/context_manager.h`'s
//! `Play`/`Pause`/`Teardown`/`IsPaused`/`SetRtpPorts` shape, split here into
//! a shared core plus per-role extensions since Sink and Source advertise
//! and consume different halves of capability negotiation (spec section
//! 4.4).

use crate::header::TransportHeader;
use crate::property::{AudioCodec, ClientRtpPorts, VideoFormats};

/// Operations common to both roles once a session is established.
pub trait MediaManager {
    fn play(&mut self);
    fn pause(&mut self);
    fn teardown(&mut self);
    fn is_paused(&self) -> bool;
    fn set_rtp_ports(&mut self, ports: TransportHeader);
}

/// A Sink's media manager: it receives a stream, so it advertises what it
/// can decode and applies whatever the Source selects.
pub trait SinkMediaManager: MediaManager {
    fn supported_audio_codecs(&self) -> Vec<AudioCodec>;
    fn supported_video_formats(&self) -> VideoFormats;
    fn apply_negotiated_formats(&mut self, audio: Option<AudioCodec>, video: Option<VideoFormats>);
    /// The primary unicast UDP port pair this Sink has allocated to receive
    /// RTP on, advertised in `wfd_client_rtp_ports` (port1 is 0 when there
    /// is no coupled secondary sink).
    fn allocated_rtp_ports(&self) -> ClientRtpPorts;
}

/// A Source's media manager: it produces a stream, so it advertises what it
/// can encode and is told which RTP ports to send to.
pub trait SourceMediaManager: MediaManager {
    fn offered_audio_codecs(&self) -> Vec<AudioCodec>;
    fn offered_video_formats(&self) -> VideoFormats;
    fn start_streaming(&mut self, destination: &TransportHeader);
}
