use std::borrow::Cow;

/// The captured prefix of one reply frame.
///
/// Holds at most the receive capacity it was read with. Truncation is not an
/// error; [`Reply::is_truncated`] reports it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    bytes: Vec<u8>,
    message_len: usize,
}

impl Reply {
    /// Keep the first `max_bytes` bytes of `message`.
    #[must_use]
    pub fn capture(message: &[u8], max_bytes: usize) -> Self {
        let len = message.len().min(max_bytes);
        Self {
            bytes: message[..len].to_vec(),
            message_len: message.len(),
        }
    }

    /// Captured bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of captured bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size of the frame as delivered, before capture.
    #[must_use]
    pub fn message_len(&self) -> usize {
        self.message_len
    }

    /// Whether bytes past the capture limit were dropped.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.message_len > self.bytes.len()
    }

    /// Captured bytes as text, replacing invalid UTF-8 (a cut may land inside
    /// a multi-byte character).
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

#[cfg(test)]
#[path = "reply_test.rs"]
mod tests;
