pub mod dispatcher;
pub mod error;
pub mod jsonrpc;
pub mod registry;
pub mod server;
pub mod session;
pub mod tools;
pub mod types;

pub use dispatcher::Dispatcher;
pub use error::ServeError;
pub use registry::ToolRegistry;
pub use server::{run_stdio, serve};
pub use session::SessionState;
pub use tools::{ToolContext, ToolFault, ToolHandler};
pub use types::{ContentBlock, ServerInfo, ToolDefinition, ToolResult};
