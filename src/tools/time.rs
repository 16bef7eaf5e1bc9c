use async_trait::async_trait;
use chrono::Local;

use crate::types::ToolResult;

use super::{ToolContext, ToolFault, ToolHandler};

/// Reports the current local time, second resolution.
pub struct GetTimeTool;

#[async_trait]
impl ToolHandler for GetTimeTool {
    fn name(&self) -> &'static str {
        "get_time"
    }

    fn description(&self) -> &'static str {
        "Returns the current system time"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(
        &self,
        _ctx: &ToolContext<'_>,
        _arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolResult, ToolFault> {
        let now = Local::now();
        Ok(ToolResult::text(format!(
            "Current time: {}",
            now.format("%Y-%m-%d %H:%M:%S")
        )))
    }
}
