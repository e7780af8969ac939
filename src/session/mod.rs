//! Per-peer session state machine (spec section 4.3).
//!
//! Grounded on `wfd_session_state.cpp`'s `M6Handler`/`M7Handler`, which
//! extend a `SequencedMessageSender` base with a `CreateMessage`/
//! `HandleReply` virtual pair. Rust has no fixed, small, closed set of
//! sequenced exchanges to dispatch virtually here (`SETUP`/`PLAY`/`PAUSE`/
//! `TEARDOWN`), so the pair becomes one `SequencedRequest` enum matched in
//! `CSeqTracker` instead of a trait object per handler.

mod sink;
mod source;

pub use sink::SinkSession;
pub use source::SourceSession;

use crate::error::ProtocolError;
use crate::message::Message;

/// Where a session sits in the M1-M9 exchange (spec section 4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Init,
    CapNegotiation,
    RtspSessionEstablishment,
    WfdSessionEstablishment,
    Playing,
    Paused,
}

/// The sequenced request a peer can originate toward the other side and is
/// waiting on a matching reply for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencedRequest {
    Options,
    Setup,
    Play,
    Pause,
    Teardown,
}

/// Tracks the CSeq of requests this peer originates and validates replies
/// against them (spec section 4.1 "half-duplex, CSeq-ordered"). Generic
/// over the marker type a concrete session uses to remember what it is
/// waiting on (`SequencedRequest` for the Sink's M6-M9, a richer enum for
/// the Source's M1/M3/M4/M5).
#[derive(Debug)]
pub struct CSeqTracker<K> {
    next: i64,
    pending: Option<(i64, K)>,
}

impl<K: Copy> Default for CSeqTracker<K> {
    fn default() -> Self {
        CSeqTracker { next: 1, pending: None }
    }
}

impl<K: Copy> CSeqTracker<K> {
    pub fn new() -> CSeqTracker<K> {
        CSeqTracker::default()
    }

    /// Allocate the CSeq for a new outgoing request and record it as
    /// outstanding. Panics if a request is already outstanding: callers
    /// must wait for its reply first (half-duplex discipline).
    pub fn begin(&mut self, request: K) -> i64 {
        assert!(self.pending.is_none(), "a sequenced request is already outstanding");
        let cseq = self.next;
        self.next += 1;
        self.pending = Some((cseq, request));
        cseq
    }

    /// Validate an incoming reply's CSeq against the outstanding request
    /// and clear it. Returns which request it completed.
    pub fn complete(&mut self, reply_cseq: Option<i64>) -> Result<K, ProtocolError> {
        let (expected_cseq, request) = self.pending.ok_or(ProtocolError::UnexpectedReply)?;
        let got = reply_cseq.ok_or(ProtocolError::UnexpectedReply)?;
        if got != expected_cseq {
            return Err(ProtocolError::CSeq { got, expected: expected_cseq });
        }
        self.pending = None;
        Ok(request)
    }
}

/// Extracts the CSeq of a message, failing if it carries none. The codec
/// already rejects a missing CSeq on parse; this only covers messages built
/// directly (tests, in-process construction).
pub fn require_cseq(message: &Message) -> Result<i64, ProtocolError> {
    message.cseq().ok_or(ProtocolError::State)
}

/// Tracks the CSeq of requests received *from* the peer and enforces their
/// ordering: a request's CSeq must equal the last one plus one, except an
/// `OPTIONS` request (which always resets the sequence) and the very first
/// request received (which seeds it). Grounded on
/// `examples/original_source/sink/mirac-sink.cpp`'s `receive_cseq_` field,
/// reset on every `OPTIONS` and checked on everything else.
#[derive(Debug, Default)]
pub struct ReceiveCseqTracker {
    last: Option<i64>,
}

impl ReceiveCseqTracker {
    pub fn new() -> ReceiveCseqTracker {
        ReceiveCseqTracker::default()
    }

    /// Validate an inbound request's CSeq. On success, records it and
    /// returns `Ok(())`. On an out-of-order CSeq, leaves the tracker
    /// unchanged and returns `Err(cseq)` with the offending value.
    pub fn validate(&mut self, cseq: i64, is_options: bool) -> Result<(), i64> {
        if !is_options {
            if let Some(last) = self.last {
                if cseq != last + 1 {
                    return Err(cseq);
                }
            }
        }
        self.last = Some(cseq);
        Ok(())
    }
}
