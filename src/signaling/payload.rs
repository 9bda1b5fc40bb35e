use axum::body::Bytes;
use serde::{Deserialize, Serialize};

/// The shape a posted body must have: a `type` tag and an SDP body.
///
/// A missing `sdp` reads as empty, since a rollback carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub sdp: String,
}

impl SessionDescription {
    pub fn new(kind: impl Into<String>, sdp: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            sdp: sdp.into(),
        }
    }

    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// A posted body, kept byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Bytes);

impl Payload {
    /// Accepts `body` if it decodes as a [`SessionDescription`], then keeps
    /// the original bytes rather than the decoded value.
    pub fn parse(body: impl Into<Bytes>) -> Result<Self, serde_json::Error> {
        let body = body.into();
        SessionDescription::decode(&body)?;
        Ok(Self(body))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// Which of a slot's two payloads an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Offer,
    Answer,
}

impl PayloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::Offer => "offer",
            PayloadKind::Answer => "answer",
        }
    }
}
