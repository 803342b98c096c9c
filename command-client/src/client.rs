use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::ORIGIN;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async_with_config};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::reply::Reply;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One websocket connection used for a request/response exchange.
///
/// Not shared: every operation takes `&mut self`, so a connection belongs to
/// the task that opened it. Dropping the client drops the socket.
pub struct CommandClient {
    stream: WsStream,
    closed: bool,
}

impl CommandClient {
    /// Validate `config`, then perform the websocket handshake against
    /// `config.url`, presenting `config.origin` as the `Origin` header.
    ///
    /// # Errors
    ///
    /// Returns a connect-class [`ClientError`] for invalid config, a malformed
    /// URL or origin, an unreachable host, or a refused handshake.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut request = config
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| ClientError::Connect(Box::new(e)))?;
        if !config.origin.is_empty() {
            let origin = HeaderValue::from_str(&config.origin)
                .map_err(|_| ClientError::InvalidOrigin(config.origin.clone()))?;
            request.headers_mut().insert(ORIGIN, origin);
        }

        let (stream, response) =
            connect_async_with_config(request, Some(unbounded_config()), false)
                .await
                .map_err(|e| ClientError::Connect(Box::new(e)))?;
        debug!(url = %config.url, status = %response.status(), "websocket connected");

        Ok(Self {
            stream,
            closed: false,
        })
    }

    /// Send `payload` as a single frame: text when it is valid UTF-8,
    /// binary otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyPayload`] for an empty payload and
    /// [`ClientError::Write`] when the connection is closed or the transport
    /// rejects the frame.
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), ClientError> {
        if payload.is_empty() {
            return Err(ClientError::EmptyPayload);
        }

        let message = match std::str::from_utf8(payload) {
            Ok(text) => Message::Text(text.to_owned().into()),
            Err(_) => Message::Binary(payload.to_vec().into()),
        };
        self.stream
            .send(message)
            .await
            .map_err(|e| ClientError::Write(Box::new(e)))?;
        debug!(bytes = payload.len(), "request sent");
        Ok(())
    }

    /// Wait for the next data frame and keep at most `max_bytes` of it.
    ///
    /// Ping, pong and raw frames are skipped; the transport answers pings on
    /// its own.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Closed`] if the connection closes before a data
    /// frame arrives, [`ClientError::Read`] on transport errors, and
    /// [`ClientError::InvalidConfig`] when `max_bytes` is zero.
    pub async fn receive_once(&mut self, max_bytes: usize) -> Result<Reply, ClientError> {
        if max_bytes == 0 {
            return Err(ClientError::InvalidConfig(
                "max_bytes must be greater than zero",
            ));
        }

        loop {
            let Some(message) = self.stream.next().await else {
                return Err(ClientError::Closed);
            };
            match message {
                Ok(message @ (Message::Text(_) | Message::Binary(_))) => {
                    let reply = Reply::capture(&message.into_data(), max_bytes);
                    debug!(
                        bytes = reply.len(),
                        message_len = reply.message_len(),
                        truncated = reply.is_truncated(),
                        "reply received"
                    );
                    return Ok(reply);
                }
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "peer closed before replying");
                    return Err(ClientError::Closed);
                }
                Ok(_) => {}
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return Err(ClientError::Closed);
                }
                Err(e) => return Err(ClientError::Read(Box::new(e))),
            }
        }
    }

    /// Send `payload`, then wait for one reply of at most `max_bytes`.
    ///
    /// # Errors
    ///
    /// Returns the first write or read error encountered.
    pub async fn request(&mut self, payload: &[u8], max_bytes: usize) -> Result<Reply, ClientError> {
        self.send(payload).await?;
        self.receive_once(max_bytes).await
    }

    /// Start the closing handshake. Closing twice, or after the peer already
    /// closed, succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Write`] if the close frame cannot be written.
    pub async fn close(&mut self) -> Result<(), ClientError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        match self.stream.close(None).await {
            Ok(())
            | Err(
                tungstenite::Error::ConnectionClosed
                | tungstenite::Error::AlreadyClosed
                | tungstenite::Error::Protocol(ProtocolError::SendAfterClosing),
            ) => {
                debug!("websocket closed");
                Ok(())
            }
            Err(e) => Err(ClientError::Write(Box::new(e))),
        }
    }

    /// Whether [`CommandClient::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Replies of any size are captured up to the caller's limit, so the
/// transport must not reject large frames on its own.
fn unbounded_config() -> WebSocketConfig {
    WebSocketConfig::default()
        .max_message_size(None)
        .max_frame_size(None)
}

/// Connect, send `payload`, read one reply of at most `config.buffer_size`
/// bytes, and close the connection whatever the outcome.
///
/// A failed close is logged and never replaces the exchange result.
///
/// # Errors
///
/// Returns the connect, write or read error that ended the exchange.
pub async fn exchange(config: &ClientConfig, payload: &[u8]) -> Result<Reply, ClientError> {
    let mut client = CommandClient::connect(config).await?;
    let outcome = client.request(payload, config.buffer_size).await;

    if let Err(error) = client.close().await {
        debug!(%error, "close after exchange failed");
    }
    outcome
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
