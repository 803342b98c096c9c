//! Client configuration, with defaults for the local challenge server.

use crate::error::ClientError;

pub const DEFAULT_URL: &str = "ws://localhost:8989/client";
pub const DEFAULT_ORIGIN: &str = "http://localhost/";
pub const DEFAULT_BUFFER_SIZE: usize = 512;

/// Where to connect and how much of a reply to keep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Websocket endpoint, e.g. `"ws://localhost:8989/client"`.
    pub url: String,
    /// Value of the `Origin` header presented during the handshake. Empty
    /// means no header is sent.
    pub origin: String,
    /// Capacity of the receive buffer used by [`crate::exchange`].
    pub buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            origin: DEFAULT_ORIGIN.to_owned(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ClientConfig {
    /// Reject configs no connection could be built from.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] for an empty URL or a zero
    /// buffer size.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.url.trim().is_empty() {
            return Err(ClientError::InvalidConfig("url must not be empty"));
        }
        if self.buffer_size == 0 {
            return Err(ClientError::InvalidConfig(
                "buffer_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
