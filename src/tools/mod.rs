use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServeError;
use crate::registry::ToolRegistry;
use crate::types::{ServerInfo, ToolResult};

mod echo;
mod sysinfo;
mod time;

pub use echo::EchoTool;
pub use sysinfo::SystemInfoTool;
pub use time::GetTimeTool;

/// Read-only process facts handed to every invocation. Tools keep no state
/// of their own between calls.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    pub server: &'a ServerInfo,
    pub tool_count: usize,
}

/// A fault inside a tool. Reported to the caller as an `isError` result,
/// never as a protocol error.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ToolFault(String);

impl ToolFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The contract every tool implements: static metadata plus an invocation
/// over already-validated arguments.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;

    async fn call(
        &self,
        ctx: &ToolContext<'_>,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolResult, ToolFault>;
}

/// Registry preloaded with the built-in tools, in their advertised order.
pub fn builtin_registry() -> Result<ToolRegistry, ServeError> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(EchoTool))?;
    registry.register(Arc::new(GetTimeTool))?;
    registry.register(Arc::new(SystemInfoTool))?;
    Ok(registry)
}
