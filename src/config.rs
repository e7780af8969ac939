use serde::{Deserialize, Serialize};

/// Tunables for the framer and session state machine.
///
/// The WFD protocol itself defines no configuration surface; these are the
/// two knobs spec section 4.2 and 5 call out as implementation-defined
/// (oversize buffer cap, inactivity timeout).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WfdConfig {
    #[serde(default)]
    pub framer: FramerConfig,
    #[serde(default)]
    pub session: SessionTimingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramerConfig {
    /// Maximum number of pending bytes to hold while waiting for a
    /// CRLF CRLF header terminator before discarding the buffer.
    #[serde(default = "default_max_header_bytes")]
    pub max_header_bytes: usize,
    /// Maximum accepted `Content-Length`. Larger values are refused as a
    /// framing error rather than trusted blindly.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            max_header_bytes: default_max_header_bytes(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimingConfig {
    /// Inactivity timeout (seconds) started after M6 completes. On expiry
    /// the peer SHOULD originate M8 (Teardown). 0 disables the timer.
    #[serde(default = "default_inactivity_timeout_secs")]
    pub inactivity_timeout_secs: u32,
}

impl Default for SessionTimingConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: default_inactivity_timeout_secs(),
        }
    }
}

fn default_max_header_bytes() -> usize {
    64 * 1024
}

fn default_max_payload_bytes() -> usize {
    64 * 1024
}

fn default_inactivity_timeout_secs() -> u32 {
    30
}
