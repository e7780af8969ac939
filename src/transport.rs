//! The byte-transport contract the session state machine is driven
//! through. No concrete socket implementation lives here: the transport
//! and its event loop are external collaborators (spec section 1),
//! supplied by the embedding application.

use crate::error::TransportError;

/// A connection to a single peer. Implementations are expected to be
/// callback-driven (register once, get invoked repeatedly) rather than
/// polled, matching the session state machine's synchronous, single-threaded
/// dispatch (spec section 5).
pub trait Transport {
    /// Write bytes to the peer. The implementation owns any internal
    /// buffering; this call does not block on the network.
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Register a callback invoked with each chunk of bytes received.
    fn register_readable(&mut self, callback: Box<dyn FnMut(&[u8]) + Send>);

    /// Register a callback invoked once the transport is ready to accept
    /// more outbound bytes after previously signaling backpressure.
    fn register_writable(&mut self, callback: Box<dyn FnMut() + Send>);

    fn peer_address(&self) -> String;

    fn close(&mut self);
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    pub struct MockTransport {
        pub sent: Arc<Mutex<Vec<Vec<u8>>>>,
        pub closed: bool,
    }

    impl MockTransport {
        pub fn new() -> MockTransport {
            MockTransport::default()
        }

        pub fn sent_messages(&self) -> Vec<Vec<u8>> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
            if self.closed {
                return Err(TransportError("connection closed".to_string()));
            }
            self.sent.lock().unwrap().push(bytes.to_vec());
            Ok(())
        }

        fn register_readable(&mut self, _callback: Box<dyn FnMut(&[u8]) + Send>) {}

        fn register_writable(&mut self, _callback: Box<dyn FnMut() + Send>) {}

        fn peer_address(&self) -> String {
            "127.0.0.1:0".to_string()
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn send_records_bytes_until_closed() {
        let mut transport = MockTransport::new();
        transport.send(b"hello").unwrap();
        assert_eq!(transport.sent_messages(), vec![b"hello".to_vec()]);
        transport.close();
        assert!(transport.send(b"world").is_err());
    }
}
