use crate::block::Block;
use crate::emit::EmitSink;
use crate::metadata::Metadata;
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Per-run state handed to an agent: who to emit to and what to tag batches with.
#[derive(Clone)]
pub struct AgentContext {
    pub id: Uuid,
    emit_sinks: Vec<Arc<dyn EmitSink>>,
    metadata: Metadata,
}

impl AgentContext {
    pub fn new(emit_sinks: Vec<Arc<dyn EmitSink>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            emit_sinks,
            metadata: Metadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// A copy of this context that emits to `emit_sinks` instead.
    pub fn with_emit_sinks(&self, emit_sinks: Vec<Arc<dyn EmitSink>>) -> Self {
        Self {
            id: self.id,
            emit_sinks,
            metadata: self.metadata.clone(),
        }
    }

    pub fn emit_sinks(&self) -> &[Arc<dyn EmitSink>] {
        &self.emit_sinks
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Deliver one batch to every sink, in order. Stops at the first failing sink.
    pub async fn emit(&self, blocks: Vec<Block>) -> Result<()> {
        for sink in &self.emit_sinks {
            sink.emit(blocks.clone(), &self.metadata).await?;
        }
        Ok(())
    }

    /// The slice of this context a tool is allowed to see.
    pub fn tool_context(&self) -> ToolContext {
        ToolContext {
            context_id: self.id,
            metadata: self.metadata.clone(),
        }
    }
}

impl std::fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentContext")
            .field("id", &self.id)
            .field("emit_sinks", &self.emit_sinks.len())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// What a tool invocation knows about the run that called it.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    pub context_id: Uuid,
    pub metadata: Metadata,
}
