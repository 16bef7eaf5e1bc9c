use async_trait::async_trait;

use crate::types::ToolResult;

use super::{ToolContext, ToolFault, ToolHandler};

/// Reports process facts as a JSON object inside a text block: server
/// identity, host platform, and how many tools are registered.
pub struct SystemInfoTool;

#[async_trait]
impl ToolHandler for SystemInfoTool {
    fn name(&self) -> &'static str {
        "system_info"
    }

    fn description(&self) -> &'static str {
        "Returns basic system information"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(
        &self,
        ctx: &ToolContext<'_>,
        _arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolResult, ToolFault> {
        let info = serde_json::json!({
            "server_name": ctx.server.name,
            "server_version": ctx.server.version,
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "tools_available": ctx.tool_count,
        });
        Ok(ToolResult::text(info.to_string()))
    }
}
