//! Mock tools — deterministic outputs for testing without service credentials.

use super::{ToolHandler, ToolKind};
use crate::block::Block;
use crate::context::ToolContext;
use anyhow::Result;
use uuid::Uuid;

fn input_text(inputs: &[Block]) -> String {
    inputs
        .iter()
        .filter_map(|b| b.as_text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stable id derived from the tool name and its input, so repeated calls agree.
fn derived_id(tool: &str, text: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{tool}:{text}").as_bytes())
}

#[derive(Debug, Clone, Default)]
pub struct MockSearchTool;

#[async_trait::async_trait]
impl ToolHandler for MockSearchTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Search
    }

    async fn invoke(&self, inputs: Vec<Block>, _context: &ToolContext) -> Result<Vec<Block>> {
        let query = input_text(&inputs);
        Ok(vec![Block::text(format!("(Mock search) No live results for: {query}"))])
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockImageTool;

#[async_trait::async_trait]
impl ToolHandler for MockImageTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ImageGeneration
    }

    async fn invoke(&self, inputs: Vec<Block>, _context: &ToolContext) -> Result<Vec<Block>> {
        let prompt = input_text(&inputs);
        let id = derived_id(self.name(), &prompt);
        let mut block = Block::image_url(format!("mock://image/{id}"));
        block.id = id;
        Ok(vec![block])
    }
}
