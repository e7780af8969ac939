//! Reassembles complete messages out of an arbitrarily-chunked byte stream
//! (spec section 4.2): accumulate until a `CRLF CRLF` header terminator is
//! seen, then wait for `Content-Length` more bytes of body.

use crate::config::FramerConfig;
use crate::error::FramingError;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Default)]
pub struct InputFramer {
    buffer: Vec<u8>,
    max_header_bytes: usize,
    max_payload_bytes: usize,
}

impl InputFramer {
    pub fn new(config: &FramerConfig) -> InputFramer {
        InputFramer {
            buffer: Vec::new(),
            max_header_bytes: config.max_header_bytes,
            max_payload_bytes: config.max_payload_bytes,
        }
    }

    /// Feed newly-received bytes in. Returns every complete message found,
    /// oldest first, leaving any partial remainder buffered for the next call.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Vec<Vec<u8>>, FramingError> {
        self.buffer.extend_from_slice(bytes);
        let mut messages = Vec::new();
        loop {
            match self.try_take_one()? {
                Some(message) => messages.push(message),
                None => break,
            }
        }
        Ok(messages)
    }

    fn try_take_one(&mut self) -> Result<Option<Vec<u8>>, FramingError> {
        let header_end = match find(&self.buffer, HEADER_TERMINATOR) {
            Some(pos) => pos,
            None => {
                if self.buffer.len() > self.max_header_bytes {
                    self.buffer.clear();
                    return Err(FramingError::Oversize(self.max_header_bytes));
                }
                return Ok(None);
            }
        };

        let body_start = header_end + HEADER_TERMINATOR.len();
        let claimed = content_length(&self.buffer[..header_end]);
        if claimed > self.max_payload_bytes {
            self.buffer.clear();
            return Err(FramingError::TruncatedPayload { claimed });
        }
        let message_end = body_start + claimed;
        if self.buffer.len() < message_end {
            return Ok(None);
        }

        let message = self.buffer[..message_end].to_vec();
        self.buffer.drain(..message_end);
        Ok(Some(message))
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Scan the header block for `Content-Length`, case-insensitively. Absent
/// or malformed is treated as zero; `codec::parse_header` is the
/// authoritative validator once the message is fully framed.
fn content_length(header_block: &[u8]) -> usize {
    let text = String::from_utf8_lossy(header_block);
    for line in text.split("\r\n") {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                return value.trim().parse().unwrap_or(0);
            }
        }
    }
    0
}
