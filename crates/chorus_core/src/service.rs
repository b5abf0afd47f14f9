//! Agent service: an agent plus its configuration, tools and output pipeline.

use crate::agent::Agent;
use crate::config::ChorusConfig;
use crate::context::AgentContext;
use crate::emit::wrap;
use crate::tools::{ToolHandler, ToolRegistry};
use crate::transform::BlockTransform;
use anyhow::Result;
use std::sync::Arc;

pub struct AgentService {
    config: ChorusConfig,
    agent: Arc<dyn Agent>,
    tools: ToolRegistry,
    output_transform: Option<Arc<dyn BlockTransform>>,
}

impl AgentService {
    pub fn new(config: ChorusConfig, agent: Arc<dyn Agent>) -> Self {
        Self {
            config,
            agent,
            tools: ToolRegistry::new(),
            output_transform: None,
        }
    }

    /// Register a tool. Tools whose kind is not enabled in the config are skipped.
    pub fn with_tool(mut self, tool: Arc<dyn ToolHandler>) -> Self {
        if self.config.tools.enabled.contains(&tool.kind()) {
            self.tools.register(tool);
        } else {
            tracing::debug!("Tool {} not enabled, skipping", tool.name());
        }
        self
    }

    /// Rewrite every emitted block with `transform` before it reaches a sink.
    pub fn with_output_transform(mut self, transform: Arc<dyn BlockTransform>) -> Self {
        self.output_transform = Some(transform);
        self
    }

    pub fn config(&self) -> &ChorusConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn system_prompt(&self) -> String {
        self.config.system_prompt()
    }

    /// Run one agent turn for `input` and emit its output.
    ///
    /// With an output transform installed the agent runs against a copy of
    /// `context` whose sinks are wrapped; the caller's context is left as is.
    pub async fn run_agent(&self, input: &str, context: &AgentContext) -> Result<()> {
        let context = match &self.output_transform {
            Some(transform) => context.with_emit_sinks(wrap(context.emit_sinks(), transform.clone())),
            None => context.clone(),
        };
        tracing::debug!(
            "Running agent {} (context {}, {} sinks)",
            self.agent.name(),
            context.id,
            context.emit_sinks().len()
        );
        let blocks = self.agent.respond(input, &context).await?;
        context.emit(blocks).await
    }
}
