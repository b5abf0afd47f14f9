use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Discriminator for the content carried by a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Text,
    Image,
    Audio,
    Video,
}

impl BlockKind {
    /// Fallback MIME type when a block does not carry one.
    pub fn default_mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Image => "image/png",
            Self::Audio => "audio/mpeg",
            Self::Video => "video/mp4",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
        };
        f.write_str(s)
    }
}

/// What a block actually holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Text(String),
    /// Handle to content stored elsewhere (URL, storage key).
    Url(String),
    Bytes(#[serde(with = "base64_bytes")] Vec<u8>),
}

mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

/// One unit of agent output.
///
/// Blocks are never mutated once built; transforms produce new blocks
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: Uuid,
    pub kind: BlockKind,
    pub payload: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Block {
    pub fn new(kind: BlockKind, payload: Payload) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            payload,
            mime_type: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, Payload::Text(text.into()))
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::new(BlockKind::Image, Payload::Url(url.into()))
    }

    pub fn audio_url(url: impl Into<String>) -> Self {
        Self::new(BlockKind::Audio, Payload::Url(url.into()))
    }

    pub fn audio_bytes(bytes: Vec<u8>, mime_type: &str) -> Self {
        Self::new(BlockKind::Audio, Payload::Bytes(bytes)).with_mime_type(mime_type)
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }

    /// Text content, if this is a text block with an inline payload.
    pub fn as_text(&self) -> Option<&str> {
        match (&self.kind, &self.payload) {
            (BlockKind::Text, Payload::Text(t)) => Some(t),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .unwrap_or_else(|| self.kind.default_mime_type())
    }

    /// How a model refers to this block inside chat text: `Block(<uuid>)`.
    pub fn reference(&self) -> String {
        format!("Block({})", self.id)
    }
}
