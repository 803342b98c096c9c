//! Single-shot websocket command client.
//!
//! Opens one websocket connection, sends one request frame, and captures at
//! most a fixed number of bytes from the next reply frame. There is no retry,
//! no timeout and no multiplexing: one connection per exchange, owned by the
//! task that opened it.
//!
//! [`exchange`] is the scoped entry point and closes the connection on every
//! path. [`CommandClient`] exposes the individual steps.

mod client;
mod config;
mod error;
mod reply;

pub use client::{CommandClient, exchange};
pub use config::{ClientConfig, DEFAULT_BUFFER_SIZE, DEFAULT_ORIGIN, DEFAULT_URL};
pub use error::ClientError;
pub use reply::Reply;
