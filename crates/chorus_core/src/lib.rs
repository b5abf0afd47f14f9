pub mod agent;
pub mod block;
pub mod config;
pub mod context;
pub mod emit;
pub mod metadata;
pub mod persona;
pub mod service;
pub mod tools;
pub mod transform;

pub use agent::{Agent, MockAgent};
pub use block::{Block, BlockKind, Payload};
pub use config::ChorusConfig;
pub use context::{AgentContext, ToolContext};
pub use emit::{wrap, EmitSink, FnSink, InterceptedSink};
pub use metadata::Metadata;
pub use persona::{Persona, Preset};
pub use service::AgentService;
pub use tools::{ToolError, ToolHandler, ToolKind, ToolRegistry, ToolSchema};
pub use transform::{BlockTransform, FnTransform, Identity};
