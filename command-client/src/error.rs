use tokio_tungstenite::tungstenite;

/// Error type for command client operations.
///
/// Variants fall into three classes matching the lifecycle of an exchange:
/// connecting ([`ClientError::is_connect`]), writing
/// ([`ClientError::is_write`]) and reading ([`ClientError::is_read`]). None of
/// them is retried by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The config or a call argument can never produce a working exchange.
    #[error("invalid client config: {0}")]
    InvalidConfig(&'static str),
    /// The origin string is not a legal HTTP header value.
    #[error("invalid origin header value: {0:?}")]
    InvalidOrigin(String),
    /// The address was malformed, unreachable, or the handshake was refused.
    #[error("websocket connect failed: {0}")]
    Connect(Box<tungstenite::Error>),
    /// Sending requires at least one byte.
    #[error("refusing to send an empty payload")]
    EmptyPayload,
    /// The transport rejected an outbound frame, or the connection is closed.
    #[error("websocket write failed: {0}")]
    Write(Box<tungstenite::Error>),
    /// The transport failed while waiting for a reply.
    #[error("websocket read failed: {0}")]
    Read(Box<tungstenite::Error>),
    /// The connection closed before any data frame arrived.
    #[error("websocket closed before a reply arrived")]
    Closed,
}

impl ClientError {
    /// Failure while establishing the connection.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::InvalidOrigin(_) | Self::Connect(_)
        )
    }

    /// Failure while sending the request.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::EmptyPayload | Self::Write(_))
    }

    /// Failure while waiting for the reply.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Closed)
    }
}
