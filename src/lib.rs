//! Wi-Fi Display (Miracast) RTSP control-plane: message model, wire codec,
//! and the Source/Sink session state machines built on top of it.

pub mod codec;
pub mod config;
pub mod error;
pub mod framer;
pub mod header;
pub mod media_manager;
pub mod message;
pub mod payload;
pub mod property;
pub mod session;
pub mod transport;

pub use config::WfdConfig;
pub use error::{FramingError, ParseError, ProtocolError, TransportError};
pub use header::{Header, TransportHeader};
pub use message::Message;
pub use payload::Payload;
