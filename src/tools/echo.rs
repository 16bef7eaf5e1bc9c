use async_trait::async_trait;

use crate::types::ToolResult;

use super::{ToolContext, ToolFault, ToolHandler};

/// Echoes the `message` argument back, prefixed so round trips stand out in
/// transcripts.
pub struct EchoTool;

#[async_trait]
impl ToolHandler for EchoTool {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn description(&self) -> &'static str {
        "Echoes back the input message"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "The message to echo back"
                }
            },
            "required": ["message"]
        })
    }

    async fn call(
        &self,
        _ctx: &ToolContext<'_>,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolResult, ToolFault> {
        let message = arguments
            .get("message")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ToolFault::new("echo requires a string 'message' argument"))?;
        Ok(ToolResult::text(format!("Echo: {message}")))
    }
}
