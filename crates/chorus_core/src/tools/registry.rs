use super::{ToolError, ToolHandler, ToolKind, ToolSchema};
use crate::block::Block;
use crate::context::ToolContext;
use anyhow::Result;
use std::sync::Arc;

/// Tools available to one agent, kept in registration order so the schema
/// list handed to the model is stable.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool handler. Replaces any existing handler with the same name.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let name = handler.name().to_string();
        tracing::debug!("Registered {:?} tool: {}", handler.kind(), name);
        match self.handlers.iter().position(|h| h.name() == name) {
            Some(i) => self.handlers[i] = handler,
            None => self.handlers.push(handler),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.iter().find(|h| h.name() == name).cloned()
    }

    /// First registered tool of the given kind.
    pub fn by_kind(&self, kind: ToolKind) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.iter().find(|h| h.kind() == kind).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Get the list of tool schemas for the LLM.
    pub fn available_tools(&self) -> Vec<ToolSchema> {
        self.handlers.iter().map(|h| h.schema()).collect()
    }

    /// Dispatch a tool call by name.
    pub async fn dispatch(
        &self,
        name: &str,
        inputs: Vec<Block>,
        context: &ToolContext,
    ) -> Result<Vec<Block>> {
        let handler = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        handler.invoke(inputs, context).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|h| h.name()))
            .finish()
    }
}
