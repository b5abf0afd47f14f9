//! Text-to-speech capability and its adapter into the tool interface.

use anyhow::Result;
use async_trait::async_trait;
use chorus_core::{Block, ToolContext, ToolHandler, ToolKind};
use std::sync::Arc;
use uuid::Uuid;

/// Speech synthesis backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize text to a single audio block.
    async fn synthesize(&self, text: &str) -> Result<Block>;

    /// Get the voice identifier being used
    fn voice_id(&self) -> &str;

    /// Get the name of this TTS provider
    fn provider_name(&self) -> &'static str;
}

/// Mock synthesizer — returns a deterministic audio reference instead of
/// calling a speech service.
#[derive(Debug, Clone)]
pub struct MockSynthesizer {
    voice_id: String,
}

impl MockSynthesizer {
    pub fn new(voice_id: &str) -> Self {
        Self {
            voice_id: voice_id.to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Block> {
        let id = Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            format!("{}:{}", self.voice_id, text).as_bytes(),
        );
        let mut block = Block::audio_url(format!("mock://speech/{}/{}", self.voice_id, id))
            .with_mime_type("audio/mpeg");
        block.id = id;
        Ok(block)
    }

    fn voice_id(&self) -> &str {
        &self.voice_id
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Exposes a [`SpeechSynthesizer`] as a speech-generation tool.
///
/// Each text input becomes one audio block; non-text inputs are ignored.
pub struct SpeechTool {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl SpeechTool {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }
}

#[async_trait]
impl ToolHandler for SpeechTool {
    fn kind(&self) -> ToolKind {
        ToolKind::SpeechGeneration
    }

    async fn invoke(&self, inputs: Vec<Block>, context: &ToolContext) -> Result<Vec<Block>> {
        let mut out = Vec::with_capacity(inputs.len());
        for text in inputs.iter().filter_map(|b| b.as_text()) {
            tracing::debug!(
                "Synthesizing {} chars with {} voice {} (context {})",
                text.chars().count(),
                self.synthesizer.provider_name(),
                self.synthesizer.voice_id(),
                context.context_id
            );
            out.push(self.synthesizer.synthesize(text).await?);
        }
        Ok(out)
    }
}
