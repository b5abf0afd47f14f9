use crate::block::Block;
use crate::context::AgentContext;
use anyhow::Result;
use async_trait::async_trait;

/// The reasoning half of an agent: given a run context, produce the next batch
/// of output blocks. Model calls and tool selection live behind this trait.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    async fn respond(&self, input: &str, context: &AgentContext) -> Result<Vec<Block>>;
}

/// Mock agent — deterministic responses for testing without an LLM.
#[derive(Debug, Clone)]
pub struct MockAgent {
    model: String,
}

impl MockAgent {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn name(&self) -> &str {
        "mock"
    }

    async fn respond(&self, input: &str, _context: &AgentContext) -> Result<Vec<Block>> {
        Ok(vec![Block::text(format!(
            "(Mock {} Response) You said: {}",
            self.model, input
        ))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_respond() {
        let agent = MockAgent::new("test-model");
        let blocks = agent
            .respond("hello", &AgentContext::new(vec![]))
            .await
            .unwrap();
        assert_eq!(blocks.len(), 1);
        let text = blocks[0].as_text().unwrap();
        assert!(text.contains("test-model"));
        assert!(text.contains("hello"));
    }
}
