//! Source-side session state machine: originates M1 (OPTIONS), M3
//! (GET_PARAMETER), M4 (SET_PARAMETER) and M5 (trigger) toward the Sink,
//! and receives the Sink's M6 (SETUP), M7 (PLAY), M8 (TEARDOWN), M9
//! (PAUSE) requests. Grounded on `examples/original_source/wfd_parser/
//! source.cpp`'s Source role, which spec.md's distillation treated only as
//! "the mirror" of Sink (see SPEC_FULL section 3).

use crate::error::{ProtocolError, TransportError};
use crate::header::Header;
use crate::media_manager::SourceMediaManager;
use crate::message::Message;
use crate::payload::Payload;
use crate::property::{Property, PropertyKey, TriggerMethod};
use crate::session::{require_cseq, CSeqTracker, ReceiveCseqTracker, State};
use crate::transport::Transport;
use crate::{codec, ParseError};

/// Hard-coded trigger URI a Source directs a Sink to SETUP against, per
/// `source.cpp`'s literal (spec.md Open Question, decided in DESIGN.md:
/// the Source serves this URL, so it is not derived from anything stored).
pub const SOURCE_TRIGGER_URI: &str = "rtsp://localhost/wfd1.0";

/// What the Source is waiting on a reply for. Distinct from the Sink's
/// `SequencedRequest` (M6-M9): the Source originates M1 and M5 triggers,
/// never M6-M9 itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutgoingRequest {
    Options,
    Trigger(TriggerMethod),
}

pub struct SourceSession<T: Transport, M: SourceMediaManager> {
    transport: T,
    media: M,
    state: State,
    cseq: CSeqTracker<OutgoingRequest>,
    receive_cseq: ReceiveCseqTracker,
    client_transport: Option<crate::header::TransportHeader>,
}

impl<T: Transport, M: SourceMediaManager> SourceSession<T, M> {
    pub fn new(transport: T, media: M) -> SourceSession<T, M> {
        SourceSession {
            transport,
            media,
            state: State::Init,
            cseq: CSeqTracker::new(),
            receive_cseq: ReceiveCseqTracker::new(),
            client_transport: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    fn send(&mut self, message: &Message) -> Result<(), TransportError> {
        self.transport.send(&codec::serialize(message))
    }

    fn reply(&mut self, cseq: Option<i64>, code: u16) -> Result<(), TransportError> {
        let mut header = Header::new();
        header.cseq = cseq;
        self.send(&Message::Reply { header, payload: Payload::new(), response_code: code })
    }

    /// Originate M1: query the Sink's supported methods.
    pub fn send_options(&mut self) -> Result<(), ProtocolError> {
        let cseq = self.cseq.begin(OutgoingRequest::Options);
        let mut header = Header::new();
        header.cseq = Some(cseq);
        self.send(&Message::Options { header, payload: Payload::new(), request_uri: "*".to_string() })
            .map_err(|_| ProtocolError::State)
    }

    /// Originate M5: instruct the Sink to begin the given sequenced
    /// exchange. Only valid once capability negotiation has produced a
    /// presentation URL for SETUP, or an established session for the rest.
    pub fn send_trigger(&mut self, method: TriggerMethod) -> Result<(), ProtocolError> {
        match (method, self.state) {
            (TriggerMethod::Setup, State::CapNegotiation) => {}
            (TriggerMethod::Play, State::WfdSessionEstablishment | State::Paused) => {}
            (TriggerMethod::Pause, State::Playing) => {}
            (TriggerMethod::Teardown, State::WfdSessionEstablishment | State::Playing | State::Paused) => {}
            _ => return Err(ProtocolError::State),
        }
        let cseq = self.cseq.begin(OutgoingRequest::Trigger(method));
        let mut header = Header::new();
        header.cseq = Some(cseq);
        let payload = Payload::new().with_property(PropertyKey::TriggerMethod, Property::TriggerMethod(method));
        self.send(&Message::SetParameter { header, payload, request_uri: SOURCE_TRIGGER_URI.to_string() })
            .map_err(|_| ProtocolError::State)
    }

    /// Dispatch one message received from the Sink.
    pub fn handle_incoming(&mut self, message: Message) -> Result<(), ProtocolError> {
        if let Message::Reply { header, payload, response_code } = message {
            return self.handle_reply(header, payload, response_code);
        }

        let is_options = matches!(message, Message::Options { .. });
        let cseq = require_cseq(&message)?;
        if let Err(offending) = self.receive_cseq.validate(cseq, is_options) {
            tracing::warn!(cseq = offending, "rejecting out-of-order inbound request");
            return self.reply(Some(offending), 400).map_err(|_| ProtocolError::State);
        }

        match message {
            Message::Options { header, .. } => self.handle_options(header),
            Message::Setup { header, .. } => {
                let transport = header.transport.clone();
                self.handle_setup(header, transport)
            }
            Message::Play { header, .. } => self.handle_play(header),
            Message::Pause { header, .. } => self.handle_pause(header),
            Message::Teardown { header, .. } => self.handle_teardown(header),
            Message::GetParameter { .. } | Message::SetParameter { .. } => Err(ProtocolError::State),
            Message::Reply { .. } => unreachable!("handled above"),
        }
    }

    fn handle_options(&mut self, header: Header) -> Result<(), ProtocolError> {
        if self.state == State::Init {
            tracing::debug!(from = ?self.state, to = ?State::CapNegotiation, "source state transition");
            self.state = State::CapNegotiation;
        }
        self.reply(header.cseq, 200).map_err(|_| ProtocolError::State)
    }

    fn handle_setup(
        &mut self,
        header: Header,
        transport: Option<crate::header::TransportHeader>,
    ) -> Result<(), ProtocolError> {
        if self.state != State::CapNegotiation {
            tracing::warn!(state = ?self.state, "rejecting SETUP not valid in current state");
            return Err(ProtocolError::State);
        }
        self.reply(header.cseq, 200).map_err(|_| ProtocolError::State)?;
        if let Some(transport) = transport {
            self.media.set_rtp_ports(transport.clone());
            self.client_transport = Some(transport);
        }
        tracing::debug!(from = ?self.state, to = ?State::WfdSessionEstablishment, "source state transition");
        self.state = State::WfdSessionEstablishment;
        Ok(())
    }

    fn handle_play(&mut self, header: Header) -> Result<(), ProtocolError> {
        if !matches!(self.state, State::WfdSessionEstablishment | State::Paused) {
            tracing::warn!(state = ?self.state, "rejecting PLAY not valid in current state");
            return Err(ProtocolError::State);
        }
        self.reply(header.cseq, 200).map_err(|_| ProtocolError::State)?;
        if let Some(transport) = self.client_transport.clone() {
            self.media.start_streaming(&transport);
        }
        self.media.play();
        tracing::debug!(from = ?self.state, to = ?State::Playing, "source state transition");
        self.state = State::Playing;
        Ok(())
    }

    fn handle_pause(&mut self, header: Header) -> Result<(), ProtocolError> {
        if self.state != State::Playing {
            tracing::warn!(state = ?self.state, "rejecting PAUSE not valid in current state");
            return Err(ProtocolError::State);
        }
        self.reply(header.cseq, 200).map_err(|_| ProtocolError::State)?;
        self.media.pause();
        tracing::debug!(from = ?self.state, to = ?State::Paused, "source state transition");
        self.state = State::Paused;
        Ok(())
    }

    fn handle_teardown(&mut self, header: Header) -> Result<(), ProtocolError> {
        self.reply(header.cseq, 200).map_err(|_| ProtocolError::State)?;
        self.media.teardown();
        tracing::debug!(from = ?self.state, to = ?State::Init, "source state transition");
        self.state = State::Init;
        Ok(())
    }

    fn handle_reply(&mut self, header: Header, payload: Payload, response_code: u16) -> Result<(), ProtocolError> {
        let request = self.cseq.complete(header.cseq).map_err(|err| {
            tracing::warn!(?err, "dropping reply with unexpected or mismatched CSeq");
            err
        })?;
        if response_code >= 300 {
            tracing::warn!(response_code, ?request, "peer replied with an error status");
            return Err(ProtocolError::State);
        }
        if request == OutgoingRequest::Options && self.state == State::Init {
            tracing::debug!(from = ?self.state, to = ?State::CapNegotiation, "source state transition");
            self.state = State::CapNegotiation;
        }
        let _ = payload;
        Ok(())
    }
}

pub fn drive<T: Transport, M: SourceMediaManager>(
    session: &mut SourceSession<T, M>,
    raw: &[u8],
) -> Result<(), SourceDriveError> {
    let message = codec::parse(raw)?;
    session.handle_incoming(message)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SourceDriveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_manager::MediaManager;
    use crate::property::{AudioCodec, AudioFormat, VideoFormats};
    use crate::transport::mock::MockTransport;

    #[derive(Default)]
    struct MockSourceMediaManager {
        playing: bool,
        torn_down: bool,
    }

    impl MediaManager for MockSourceMediaManager {
        fn play(&mut self) {
            self.playing = true;
        }
        fn pause(&mut self) {
            self.playing = false;
        }
        fn teardown(&mut self) {
            self.torn_down = true;
        }
        fn is_paused(&self) -> bool {
            !self.playing
        }
        fn set_rtp_ports(&mut self, _ports: crate::header::TransportHeader) {}
    }

    impl SourceMediaManager for MockSourceMediaManager {
        fn offered_audio_codecs(&self) -> Vec<AudioCodec> {
            vec![AudioCodec { format: AudioFormat::Lpcm, modes: 0x3, latency: 0 }]
        }
        fn offered_video_formats(&self) -> VideoFormats {
            VideoFormats { native: 0, preferred_display_mode: 0, h264_codecs: vec![] }
        }
        fn start_streaming(&mut self, _destination: &crate::header::TransportHeader) {}
    }

    fn session() -> SourceSession<MockTransport, MockSourceMediaManager> {
        SourceSession::new(MockTransport::new(), MockSourceMediaManager::default())
    }

    #[test]
    fn send_options_allocates_cseq_one() {
        let mut session = session();
        session.send_options().unwrap();
        let sent = session.transport.sent_messages();
        assert_eq!(sent.len(), 1);
        assert!(String::from_utf8(sent[0].clone()).unwrap().starts_with("OPTIONS"));
    }

    #[test]
    fn sink_originated_setup_play_teardown() {
        let mut session = session();
        session.state = State::CapNegotiation;

        let mut setup_header = Header::new();
        setup_header.cseq = Some(1);
        session
            .handle_incoming(Message::Setup { header: setup_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap();
        assert_eq!(session.state(), State::WfdSessionEstablishment);

        let mut play_header = Header::new();
        play_header.cseq = Some(2);
        session
            .handle_incoming(Message::Play { header: play_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap();
        assert_eq!(session.state(), State::Playing);
        assert!(session.media().playing);

        let mut teardown_header = Header::new();
        teardown_header.cseq = Some(3);
        session
            .handle_incoming(Message::Teardown { header: teardown_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap();
        assert_eq!(session.state(), State::Init);
        assert!(session.media().torn_down);
    }

    #[test]
    fn play_before_setup_is_rejected() {
        let mut session = session();
        let mut play_header = Header::new();
        play_header.cseq = Some(1);
        let err = session
            .handle_incoming(Message::Play { header: play_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap_err();
        assert_eq!(err, ProtocolError::State);
    }

    #[test]
    fn out_of_order_inbound_request_gets_400_and_does_not_advance_state() {
        let mut session = session();
        session.state = State::CapNegotiation;

        let mut setup_header = Header::new();
        setup_header.cseq = Some(1);
        session
            .handle_incoming(Message::Setup { header: setup_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap();
        assert_eq!(session.state(), State::WfdSessionEstablishment);

        let mut skipped_play_header = Header::new();
        skipped_play_header.cseq = Some(9);
        session
            .handle_incoming(Message::Play { header: skipped_play_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap();

        let sent = session.transport.sent_messages();
        let reply = String::from_utf8(sent.last().unwrap().clone()).unwrap();
        assert!(reply.starts_with("RTSP/1.0 400 OK"));
        assert!(reply.contains("CSeq: 9"));
        assert_eq!(session.state(), State::WfdSessionEstablishment);
        assert!(!session.media().playing);
    }

    #[test]
    fn options_always_resets_receive_cseq() {
        let mut session = session();
        session.state = State::CapNegotiation;

        let mut setup_header = Header::new();
        setup_header.cseq = Some(1);
        session
            .handle_incoming(Message::Setup { header: setup_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap();

        let mut options_header = Header::new();
        options_header.cseq = Some(41);
        session
            .handle_incoming(Message::Options { header: options_header, payload: Payload::new(), request_uri: "*".to_string() })
            .unwrap();
        assert!(last_reply(&session).starts_with("RTSP/1.0 200 OK"));

        let mut play_header = Header::new();
        play_header.cseq = Some(42);
        session
            .handle_incoming(Message::Play { header: play_header, payload: Payload::new(), request_uri: SOURCE_TRIGGER_URI.to_string() })
            .unwrap();
        assert_eq!(session.state(), State::Playing);
    }

    fn last_reply(session: &SourceSession<MockTransport, MockSourceMediaManager>) -> String {
        let sent = session.transport.sent_messages();
        String::from_utf8(sent.last().unwrap().clone()).unwrap()
    }
}
