//! Sink-side session state machine: receives M1/M3/M4/M5 from the Source
//! and originates M6 (SETUP), M7 (PLAY), M8 (TEARDOWN), M9 (PAUSE) in
//! response to M5 triggers. Grounded on `wfd_session_state.cpp`'s
//! `WfdSessionState`, which composes the M6/M7 sequenced handlers with the
//! optional M3/M4/Teardown handlers.

use crate::error::{ProtocolError, TransportError};
use crate::header::{Header, TransportHeader};
use crate::media_manager::SinkMediaManager;
use crate::message::Message;
use crate::payload::Payload;
use crate::property::{Property, PropertyKey, PropertyValue, TriggerMethod};
use crate::session::{require_cseq, CSeqTracker, ReceiveCseqTracker, SequencedRequest, State};
use crate::transport::Transport;
use crate::{codec, ParseError};

const SUPPORTED_METHODS: &[&str] =
    &["OPTIONS", "GET_PARAMETER", "SET_PARAMETER", "SETUP", "PLAY", "PAUSE", "TEARDOWN"];
const DEFAULT_CLIENT_PORT: u16 = 19000;

pub struct SinkSession<T: Transport, M: SinkMediaManager> {
    transport: T,
    media: M,
    state: State,
    cseq: CSeqTracker<SequencedRequest>,
    receive_cseq: ReceiveCseqTracker,
    presentation_url: Option<String>,
    session_id: Option<String>,
}

impl<T: Transport, M: SinkMediaManager> SinkSession<T, M> {
    pub fn new(transport: T, media: M) -> SinkSession<T, M> {
        SinkSession {
            transport,
            media,
            state: State::Init,
            cseq: CSeqTracker::new(),
            receive_cseq: ReceiveCseqTracker::new(),
            presentation_url: None,
            session_id: None,
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

    fn reply(&mut self, cseq: Option<i64>, code: u16, payload: Payload) -> Result<(), TransportError> {
        let mut header = Header::new();
        header.cseq = cseq;
        self.send(&Message::Reply { header, payload, response_code: code })
    }

    /// Dispatch one message received from the Source.
    pub fn handle_incoming(&mut self, message: Message) -> Result<(), ProtocolError> {
        if let Message::Reply { header, payload, response_code } = message {
            return self.handle_reply(header, payload, response_code);
        }

        let is_options = matches!(message, Message::Options { .. });
        let cseq = require_cseq(&message)?;
        if let Err(offending) = self.receive_cseq.validate(cseq, is_options) {
            tracing::warn!(cseq = offending, "rejecting out-of-order inbound request");
            return self.reply(Some(offending), 400, Payload::new()).map_err(|_| ProtocolError::State);
        }

        match message {
            Message::Options { header, .. } => self.handle_options(header),
            Message::GetParameter { header, payload, .. } => self.handle_get_parameter(header, payload),
            Message::SetParameter { header, payload, .. } => self.handle_set_parameter(header, payload),
            Message::Setup { .. } | Message::Play { .. } | Message::Pause { .. } | Message::Teardown { .. } => {
                tracing::warn!("dropping Sink-originated-only message received from the Source");
                Err(ProtocolError::State)
            }
            Message::Reply { .. } => unreachable!("handled above"),
        }
    }

    fn handle_options(&mut self, header: Header) -> Result<(), ProtocolError> {
        let mut reply_header = Header::new();
        reply_header.cseq = header.cseq;
        reply_header.supported_methods = SUPPORTED_METHODS.iter().map(|m| m.to_string()).collect();
        if self.state == State::Init {
            tracing::debug!(from = ?self.state, to = ?State::CapNegotiation, "sink state transition");
            self.state = State::CapNegotiation;
        }
        self.send(&Message::Reply { header: reply_header, payload: Payload::new(), response_code: 200 })
            .map_err(|_| ProtocolError::State)
    }

    fn handle_get_parameter(&mut self, header: Header, payload: Payload) -> Result<(), ProtocolError> {
        let mut reply_payload = Payload::new();
        for key in &payload.get_parameter_list {
            let value = match key {
                PropertyKey::AudioCodecs => {
                    PropertyValue::Value(Property::AudioCodecs(self.media.supported_audio_codecs()))
                }
                PropertyKey::VideoFormats => {
                    PropertyValue::Value(Property::VideoFormats(self.media.supported_video_formats()))
                }
                PropertyKey::ClientRtpPorts => {
                    PropertyValue::Value(Property::ClientRtpPorts(self.media.allocated_rtp_ports()))
                }
                PropertyKey::StandbyResumeCapability => {
                    PropertyValue::Value(Property::StandbyResumeCapability(false))
                }
                PropertyKey::ConnectorType => PropertyValue::None,
                _ => PropertyValue::None,
            };
            reply_payload.properties.insert(key.clone(), value);
        }
        self.reply(header.cseq, 200, reply_payload).map_err(|_| ProtocolError::State)
    }

    fn handle_set_parameter(&mut self, header: Header, payload: Payload) -> Result<(), ProtocolError> {
        let trigger = payload.properties.get(&PropertyKey::TriggerMethod).and_then(|v| match v {
            PropertyValue::Value(Property::TriggerMethod(method)) => Some(*method),
            _ => None,
        });

        match trigger {
            Some(method) => self.handle_trigger(header, method),
            None => self.handle_parameter_update(header, payload),
        }
    }

    fn handle_parameter_update(&mut self, header: Header, payload: Payload) -> Result<(), ProtocolError> {
        let Some(PropertyValue::Value(Property::PresentationUrl(url))) =
            payload.properties.get(&PropertyKey::PresentationUrl)
        else {
            tracing::warn!("SET_PARAMETER update received without a presentation URL, replying 303");
            let error_payload = Payload::new().with_error(PropertyKey::PresentationUrl, vec![404]);
            self.reply(header.cseq, 303, error_payload).map_err(|_| ProtocolError::State)?;
            return Ok(());
        };
        self.presentation_url = url.url1.clone();
        let audio = match payload.properties.get(&PropertyKey::AudioCodecs) {
            Some(PropertyValue::Value(Property::AudioCodecs(codecs))) => codecs.first().cloned(),
            _ => None,
        };
        let video = match payload.properties.get(&PropertyKey::VideoFormats) {
            Some(PropertyValue::Value(Property::VideoFormats(formats))) => Some(formats.clone()),
            _ => None,
        };
        if audio.is_some() || video.is_some() {
            self.media.apply_negotiated_formats(audio, video);
        }
        self.reply(header.cseq, 200, Payload::new()).map_err(|_| ProtocolError::State)
    }

    fn handle_trigger(&mut self, header: Header, method: TriggerMethod) -> Result<(), ProtocolError> {
        match method {
            TriggerMethod::Setup => self.handle_setup_trigger(header),
            TriggerMethod::Play => self.handle_role_trigger(header, SequencedRequest::Play, State::Playing),
            TriggerMethod::Pause => self.handle_role_trigger(header, SequencedRequest::Pause, State::Paused),
            TriggerMethod::Teardown => {
                self.handle_role_trigger(header, SequencedRequest::Teardown, State::Init)
            }
        }
    }

    fn handle_setup_trigger(&mut self, header: Header) -> Result<(), ProtocolError> {
        let Some(url) = self.presentation_url.clone() else {
            tracing::warn!("SETUP trigger received before a presentation URL was set, replying 303");
            let payload = Payload::new().with_error(PropertyKey::PresentationUrl, vec![404]);
            self.reply(header.cseq, 303, payload).map_err(|_| ProtocolError::State)?;
            return Ok(());
        };
        if self.state != State::CapNegotiation {
            return Err(ProtocolError::State);
        }
        self.reply(header.cseq, 200, Payload::new()).map_err(|_| ProtocolError::State)?;

        let cseq = self.cseq.begin(SequencedRequest::Setup);
        let mut request_header = Header::new();
        request_header.cseq = Some(cseq);
        request_header.transport =
            Some(TransportHeader { client_port: DEFAULT_CLIENT_PORT, ..Default::default() });
        tracing::debug!(from = ?self.state, to = ?State::RtspSessionEstablishment, "sink state transition");
        self.state = State::RtspSessionEstablishment;
        self.send(&Message::Setup { header: request_header, payload: Payload::new(), request_uri: url })
            .map_err(|_| ProtocolError::State)
    }

    fn handle_role_trigger(
        &mut self,
        header: Header,
        request: SequencedRequest,
        _target_state: State,
    ) -> Result<(), ProtocolError> {
        if self.state != State::WfdSessionEstablishment
            && !(request == SequencedRequest::Pause && self.state == State::Playing)
            && !(request == SequencedRequest::Play && self.state == State::Paused)
            && !(request == SequencedRequest::Teardown
                && matches!(self.state, State::Playing | State::Paused | State::WfdSessionEstablishment))
        {
            tracing::warn!(?request, state = ?self.state, "rejecting trigger not valid in current state");
            return Err(ProtocolError::State);
        }
        self.reply(header.cseq, 200, Payload::new()).map_err(|_| ProtocolError::State)?;

        let cseq = self.cseq.begin(request);
        let mut request_header = Header::new();
        request_header.cseq = Some(cseq);
        request_header.session = self.session_id.clone();
        let url = self.presentation_url.clone().unwrap_or_default();
        let message = match request {
            SequencedRequest::Play => Message::Play { header: request_header, payload: Payload::new(), request_uri: url },
            SequencedRequest::Pause => Message::Pause { header: request_header, payload: Payload::new(), request_uri: url },
            SequencedRequest::Teardown => {
                Message::Teardown { header: request_header, payload: Payload::new(), request_uri: url }
            }
            SequencedRequest::Setup | SequencedRequest::Options => unreachable!("not a role trigger"),
        };
        self.send(&message).map_err(|_| ProtocolError::State)
    }

    fn handle_reply(&mut self, header: Header, _payload: Payload, response_code: u16) -> Result<(), ProtocolError> {
        let request = self.cseq.complete(header.cseq).map_err(|err| {
            tracing::warn!(?err, "dropping reply with unexpected or mismatched CSeq");
            err
        })?;
        if response_code >= 300 {
            tracing::warn!(response_code, ?request, "peer replied with an error status");
            return Err(ProtocolError::State);
        }
        let from = self.state;
        match request {
            SequencedRequest::Setup => {
                self.session_id = header.session.clone();
                self.state = State::WfdSessionEstablishment;
            }
            SequencedRequest::Play => {
                self.media.play();
                self.state = State::Playing;
            }
            SequencedRequest::Pause => {
                self.media.pause();
                self.state = State::Paused;
            }
            SequencedRequest::Teardown => {
                self.media.teardown();
                self.session_id = None;
                self.state = State::Init;
            }
            SequencedRequest::Options => {}
        }
        if self.state != from {
            tracing::debug!(?from, to = ?self.state, "sink state transition");
        }
        Ok(())
    }
}

/// Parse one incoming wire message and dispatch it in one step.
pub fn drive<T: Transport, M: SinkMediaManager>(
    session: &mut SinkSession<T, M>,
    raw: &[u8],
) -> Result<(), SinkDriveError> {
    let message = codec::parse(raw)?;
    session.handle_incoming(message)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SinkDriveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
