//! Response Envelope Module
//!
//! The wire shape providers answer with, and the tagged outcome the
//! dispatcher branches on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

// == Response Envelope ==
/// A raw provider result: a payload, a failure message, or (malformed)
/// neither. Mirrors the upstream JSON shape where both fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Successful payload, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// An envelope carrying a successful payload.
    pub fn success(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// An envelope carrying a failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    // == Into Outcome ==
    /// Collapses the envelope into its tagged outcome.
    ///
    /// A failure message wins when both fields are present. An envelope
    /// carrying neither is malformed and yields the shape error.
    pub fn into_outcome(self) -> Result<Outcome> {
        if let Some(message) = self.error {
            return Ok(Outcome::Failure { message });
        }
        match self.data {
            Some(payload) => Ok(Outcome::Success { payload }),
            None => Err(Error::Shape),
        }
    }
}

// == Outcome ==
/// A provider result after shape validation: exactly one of a payload or a
/// failure message, so dispatch can branch exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The operation succeeded with this payload
    Success { payload: Value },
    /// The provider reported this failure
    Failure { message: String },
}
