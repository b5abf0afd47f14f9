use anyhow::Result;
use async_trait::async_trait;
use chorus_core::{Block, BlockTransform, ToolContext, ToolError, ToolHandler};
use std::sync::Arc;

/// Replaces text blocks with spoken audio; every other kind passes through.
pub struct SpeakText {
    speech: Arc<dyn ToolHandler>,
    context: ToolContext,
}

impl SpeakText {
    pub fn new(speech: Arc<dyn ToolHandler>, context: ToolContext) -> Self {
        Self { speech, context }
    }
}

#[async_trait]
impl BlockTransform for SpeakText {
    async fn transform(&self, block: Block) -> Result<Vec<Block>> {
        if !block.is_text() {
            return Ok(vec![block]);
        }
        let spoken = self.speech.invoke(vec![block], &self.context).await?;
        match spoken.into_iter().next() {
            Some(audio) => Ok(vec![audio]),
            None => Err(ToolError::EmptyOutput(self.speech.name().to_string()).into()),
        }
    }
}
