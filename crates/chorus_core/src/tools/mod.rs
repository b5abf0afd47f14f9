//! Tool capability types shared by the agent service and the voice crate.
//!
//! Tools are opaque capabilities: the crate never implements search, image
//! or speech generation itself. It only knows which kind a tool is, how to
//! describe it to a model and how to call it.

pub mod mock;
mod registry;

pub use registry::ToolRegistry;

use crate::block::Block;
use crate::context::ToolContext;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The tool families an agent can be assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Search,
    ImageGeneration,
    SpeechGeneration,
}

impl ToolKind {
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::ImageGeneration => "generate_image",
            Self::SpeechGeneration => "generate_speech",
        }
    }

    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Search => "Search the web and return a short text summary of the results.",
            Self::ImageGeneration => {
                "Generate an image from a text prompt. Returns an image block."
            }
            Self::SpeechGeneration => {
                "Read text aloud. Returns an audio block containing the spoken text."
            }
        }
    }

    /// JSON schema advertised to the model for this kind of tool.
    pub fn schema(&self, name: &str) -> ToolSchema {
        let (param, desc) = match self {
            Self::Search => ("query", "What to search for"),
            Self::ImageGeneration => ("prompt", "Description of the image to generate"),
            Self::SpeechGeneration => ("text", "The text to speak"),
        };
        let mut properties = serde_json::Map::new();
        properties.insert(
            param.to_string(),
            json!({ "type": "string", "description": desc }),
        );
        ToolSchema {
            name: name.to_string(),
            description: self.default_description().to_string(),
            input_schema: ToolInputSchema {
                schema_type: "object".to_string(),
                properties: Value::Object(properties),
                required: vec![param.to_string()],
            },
        }
    }
}

/// JSON tool definition sent to the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// JSON Schema for tool input parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: Value,
    pub required: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Tool {0} returned no output")]
    EmptyOutput(String),
}

/// A callable tool. One invocation takes blocks in and gives blocks back.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    fn kind(&self) -> ToolKind;

    /// Unique name used for dispatch (must match the tool name in schema).
    fn name(&self) -> &str {
        self.kind().default_name()
    }

    fn description(&self) -> &str {
        self.kind().default_description()
    }

    fn schema(&self) -> ToolSchema {
        let mut schema = self.kind().schema(self.name());
        schema.description = self.description().to_string();
        schema
    }

    async fn invoke(&self, inputs: Vec<Block>, context: &ToolContext) -> Result<Vec<Block>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_shape() {
        let schema = ToolKind::SpeechGeneration.schema("say");
        assert_eq!(schema.name, "say");
        assert_eq!(schema.input_schema.required, vec!["text".to_string()]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["input_schema"]["type"], "object");
        assert_eq!(json["input_schema"]["properties"]["text"]["type"], "string");
    }

    struct Renamed;

    #[async_trait::async_trait]
    impl ToolHandler for Renamed {
        fn kind(&self) -> ToolKind {
            ToolKind::Search
        }

        fn name(&self) -> &str {
            "lookup"
        }

        fn description(&self) -> &str {
            "Look something up in the house wiki"
        }

        async fn invoke(&self, inputs: Vec<Block>, _context: &ToolContext) -> Result<Vec<Block>> {
            Ok(inputs)
        }
    }

    #[test]
    fn test_handler_schema_uses_overridden_description() {
        let schema = Renamed.schema();
        assert_eq!(schema.name, "lookup");
        assert_eq!(schema.description, "Look something up in the house wiki");
        assert_eq!(schema.input_schema.required, vec!["query".to_string()]);
    }

    #[test]
    fn test_kind_parses_snake_case() {
        let kind: ToolKind = serde_json::from_str(r#""image_generation""#).unwrap();
        assert_eq!(kind, ToolKind::ImageGeneration);
        assert_eq!(kind.default_name(), "generate_image");
    }
}
