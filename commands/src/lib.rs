//! Command envelope and challenge message model for the challenge server.
//!
//! Every request on the wire is a JSON object with exactly two keys, in order:
//! `command` (the operation name) and `args` (an object, possibly empty).
//! Replies are free-form JSON; the only shape this crate understands is the
//! challenge broadcast, recognized by its `challenge_name` key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exact bytes of the `get_current_challenge` request.
pub const GET_CURRENT_CHALLENGE: &str = r#"{"command":"get_current_challenge","args":{}}"#;

/// Error returned by the encode/decode helpers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A command could not be serialized to JSON.
    #[error("failed to encode command: {0}")]
    Encode(#[source] serde_json::Error),
    /// The raw bytes were not the expected JSON shape.
    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A request understood by the challenge server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum Command {
    /// Ask for the challenge currently being mined.
    GetCurrentChallenge {},
    /// Submit a nonce solving the current challenge.
    Submission {
        /// Wallet credited with the solution.
        wallet_id: String,
        /// Winning nonce, as a decimal string.
        nonce: String,
    },
}

impl Command {
    /// The `get_current_challenge` command.
    #[must_use]
    pub fn get_current_challenge() -> Self {
        Self::GetCurrentChallenge {}
    }

    /// A `submission` command for `nonce` on behalf of `wallet_id`.
    #[must_use]
    pub fn submission(wallet_id: impl Into<String>, nonce: u64) -> Self {
        Self::Submission {
            wallet_id: wallet_id.into(),
            nonce: nonce.to_string(),
        }
    }

    /// Wire name of the command, e.g. `"submission"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetCurrentChallenge {} => "get_current_challenge",
            Self::Submission { .. } => "submission",
        }
    }
}

/// A challenge broadcast by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Challenge kind, e.g. `"sorted_list"`.
    pub challenge_name: String,
    /// Hash of the previously accepted solution, seeding this round.
    pub last_solution_hash: String,
    /// Prefix a solution hash must start with.
    pub hash_prefix: String,
    /// Kind-specific parameters.
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl Challenge {
    /// Number of elements for list challenges, when present.
    #[must_use]
    pub fn nb_elements(&self) -> Option<u64> {
        self.parameters.get("nb_elements").and_then(Value::as_u64)
    }
}

/// Encode a command into its JSON wire bytes.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_command(command: &Command) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(command).map_err(CodecError::Encode)
}

/// Decode JSON wire bytes into a command.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or unknown commands.
pub fn decode_command(bytes: &[u8]) -> Result<Command, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

/// Parse a server reply as a challenge.
///
/// Returns `Ok(None)` when the reply is valid JSON but carries no
/// `challenge_name` (acks, errors, and other notices).
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed or truncated JSON, or for a
/// challenge missing required fields.
pub fn parse_challenge(bytes: &[u8]) -> Result<Option<Challenge>, CodecError> {
    let value = serde_json::from_slice::<Value>(bytes).map_err(CodecError::Decode)?;
    let is_challenge = value
        .as_object()
        .is_some_and(|map| map.contains_key("challenge_name"));
    if !is_challenge {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(CodecError::Decode)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
