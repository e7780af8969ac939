//! End-to-end M1-M7 Sink conversation driven entirely through wire bytes,
//! exercising `codec`, `framer` and `session::SinkSession` together the way
//! an embedding application would.

use std::sync::{Arc, Mutex};

use wfd_session::config::FramerConfig;
use wfd_session::error::TransportError;
use wfd_session::framer::InputFramer;
use wfd_session::header::TransportHeader;
use wfd_session::media_manager::{MediaManager, SinkMediaManager};
use wfd_session::property::{AudioCodec, AudioFormat, ClientRtpPorts, H264Codec, VideoFormats};
use wfd_session::session::{SinkSession, State};
use wfd_session::transport::Transport;

#[derive(Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Transport for RecordingTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(bytes.to_vec());
        Ok(())
    }
    fn register_readable(&mut self, _callback: Box<dyn FnMut(&[u8]) + Send>) {}
    fn register_writable(&mut self, _callback: Box<dyn FnMut() + Send>) {}
    fn peer_address(&self) -> String {
        "10.0.0.2:7236".to_string()
    }
    fn close(&mut self) {}
}

#[derive(Default)]
struct StubMediaManager {
    paused: bool,
    torn_down: bool,
}

impl MediaManager for StubMediaManager {
    fn play(&mut self) {
        self.paused = false;
    }
    fn pause(&mut self) {
        self.paused = true;
    }
    fn teardown(&mut self) {
        self.torn_down = true;
    }
    fn is_paused(&self) -> bool {
        self.paused
    }
    fn set_rtp_ports(&mut self, _ports: TransportHeader) {}
}

impl SinkMediaManager for StubMediaManager {
    fn supported_audio_codecs(&self) -> Vec<AudioCodec> {
        vec![AudioCodec { format: AudioFormat::Lpcm, modes: 0x3, latency: 0 }]
    }

    fn supported_video_formats(&self) -> VideoFormats {
        VideoFormats {
            native: 0x20,
            preferred_display_mode: 0x00,
            h264_codecs: vec![H264Codec {
                profile: 0x01,
                level: 0x02,
                cea_support: 0xffff_ffff,
                vesa_support: 0,
                hh_support: 0,
                latency: 0,
                min_slice_size: 0,
                slice_enc_params: 0,
                frame_rate_control_support: 0,
                max_hres: None,
                max_vres: None,
            }],
        }
    }

    fn apply_negotiated_formats(&mut self, _audio: Option<AudioCodec>, _video: Option<VideoFormats>) {}

    fn allocated_rtp_ports(&self) -> ClientRtpPorts {
        ClientRtpPorts { port0: 19000, port1: 0 }
    }
}

fn last_sent(sent: &Arc<Mutex<Vec<Vec<u8>>>>) -> String {
    String::from_utf8(sent.lock().unwrap().last().unwrap().clone()).unwrap()
}

#[test]
fn full_negotiation_and_streaming_cycle() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport { sent: sent.clone() };
    let mut session = SinkSession::new(transport, StubMediaManager::default());
    let mut framer = InputFramer::new(&FramerConfig { max_header_bytes: 65536, max_payload_bytes: 65536 });

    // M1: Source queries supported methods.
    let m1 = b"OPTIONS * RTSP/1.0\r\nCSeq: 1\r\nRequire: org.wfa.wfd1.0\r\nContent-Length: 0\r\n\r\n";
    for message in framer.push(m1).unwrap() {
        let parsed = wfd_session::codec::parse(&message).unwrap();
        session.handle_incoming(parsed).unwrap();
    }
    assert_eq!(session.state(), State::CapNegotiation);
    assert!(last_sent(&sent).starts_with("RTSP/1.0 200 OK"));

    // M3: Source asks for capabilities.
    let m3_body = "wfd_audio_codecs\r\nwfd_video_formats\r\n";
    let m3 = format!(
        "GET_PARAMETER rtsp://localhost/wfd1.0 RTSP/1.0\r\nCSeq: 2\r\nContent-Length: {}\r\n\r\n{}",
        m3_body.len(),
        m3_body
    );
    let m3 = m3.as_bytes();
    for message in framer.push(m3).unwrap() {
        let parsed = wfd_session::codec::parse(&message).unwrap();
        session.handle_incoming(parsed).unwrap();
    }
    let reply = last_sent(&sent);
    assert!(reply.contains("wfd_audio_codecs: LPCM 00000003 00"));
    assert!(reply.contains("wfd_video_formats: 20 00"));

    // M4: Source sets the presentation URL this Sink will SETUP against.
    let m4_body = "wfd_presentation_url: rtsp://10.0.0.1/wfd1.0 none\r\n";
    let m4 = format!(
        "SET_PARAMETER rtsp://localhost/wfd1.0 RTSP/1.0\r\nCSeq: 3\r\nContent-Length: {}\r\n\r\n{}",
        m4_body.len(),
        m4_body
    );
    for message in framer.push(m4.as_bytes()).unwrap() {
        let parsed = wfd_session::codec::parse(&message).unwrap();
        session.handle_incoming(parsed).unwrap();
    }
    assert!(last_sent(&sent).starts_with("RTSP/1.0 200 OK"));

    // M5: trigger SETUP. The Sink replies 200 to the trigger, then
    // originates its own SETUP (M6) request.
    let m5_body = "wfd_trigger_method: SETUP\r\n";
    let m5 = format!(
        "SET_PARAMETER rtsp://localhost/wfd1.0 RTSP/1.0\r\nCSeq: 4\r\nContent-Length: {}\r\n\r\n{}",
        m5_body.len(),
        m5_body
    );
    for message in framer.push(m5.as_bytes()).unwrap() {
        let parsed = wfd_session::codec::parse(&message).unwrap();
        session.handle_incoming(parsed).unwrap();
    }
    let setup_request = last_sent(&sent);
    assert!(setup_request.starts_with("SETUP rtsp://10.0.0.1/wfd1.0 RTSP/1.0"));
    assert_eq!(session.state(), State::RtspSessionEstablishment);

    // Source's reply to M6 carries the session identifier.
    let m6_reply = b"RTSP/1.0 200 OK\r\nCSeq: 1\r\nSession: 9339992000890\r\nContent-Length: 0\r\n\r\n";
    for message in framer.push(m6_reply).unwrap() {
        let parsed = wfd_session::codec::parse(&message).unwrap();
        session.handle_incoming(parsed).unwrap();
    }
    assert_eq!(session.state(), State::WfdSessionEstablishment);

    // M5 PLAY trigger, then the Source's reply to the Sink's own PLAY (M7).
    let m5_play_body = "wfd_trigger_method: PLAY\r\n";
    let m5_play = format!(
        "SET_PARAMETER rtsp://localhost/wfd1.0 RTSP/1.0\r\nCSeq: 5\r\nContent-Length: {}\r\n\r\n{}",
        m5_play_body.len(),
        m5_play_body
    );
    for message in framer.push(m5_play.as_bytes()).unwrap() {
        let parsed = wfd_session::codec::parse(&message).unwrap();
        session.handle_incoming(parsed).unwrap();
    }
    let m7_reply = b"RTSP/1.0 200 OK\r\nCSeq: 2\r\nContent-Length: 0\r\n\r\n";
    for message in framer.push(m7_reply).unwrap() {
        let parsed = wfd_session::codec::parse(&message).unwrap();
        session.handle_incoming(parsed).unwrap();
    }
    assert_eq!(session.state(), State::Playing);
}

#[test]
fn setup_trigger_before_presentation_url_is_rejected_with_property_error() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport { sent: sent.clone() };
    let mut session = SinkSession::new(transport, StubMediaManager::default());

    let options = b"OPTIONS * RTSP/1.0\r\nCSeq: 1\r\nContent-Length: 0\r\n\r\n";
    session.handle_incoming(wfd_session::codec::parse(options).unwrap()).unwrap();

    let trigger_body = "wfd_trigger_method: SETUP\r\n";
    let trigger = format!(
        "SET_PARAMETER rtsp://localhost/wfd1.0 RTSP/1.0\r\nCSeq: 2\r\nContent-Length: {}\r\n\r\n{}",
        trigger_body.len(),
        trigger_body
    );
    session.handle_incoming(wfd_session::codec::parse(trigger.as_bytes()).unwrap()).unwrap();

    let reply = last_sent(&sent);
    assert!(reply.starts_with("RTSP/1.0 303 OK"));
    assert!(reply.contains("wfd_presentation_url: 404"));
    assert_eq!(session.state(), State::CapNegotiation);
}
