use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ServeError;
use crate::jsonrpc::{ErrorObject, Notification, Request, RequestId, Response};
use crate::registry::ToolRegistry;
use crate::session::SessionState;
use crate::tools::ToolContext;
use crate::types::{
    CallToolParams, InitializeParams, InitializeResult, ListToolsResult, ServerInfo, ToolResult,
};

fn server_capabilities() -> Value {
    serde_json::json!({
        "tools": {
            "listChanged": false
        }
    })
}

/// Routes validated requests to their handlers and enforces the session
/// lifecycle. Owns the registry and the per-connection state.
pub struct Dispatcher {
    server_info: ServerInfo,
    registry: ToolRegistry,
    session: SessionState,
}

impl Dispatcher {
    pub fn new(server_info: ServerInfo, registry: ToolRegistry) -> Self {
        Self {
            server_info,
            registry,
            session: SessionState::default(),
        }
    }

    /// Dispatcher preloaded with the built-in tools.
    pub fn with_builtin_tools(server_info: ServerInfo) -> Result<Self, ServeError> {
        Ok(Self::new(server_info, crate::tools::builtin_registry()?))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Produces exactly one response per request. Anything unexpected in the
    /// caller's input becomes an error response under the request's own id.
    pub async fn dispatch(&mut self, req: Request) -> Response {
        debug!(method = %req.method, id = ?req.id, "dispatching request");

        // initialize and ping are the only methods exempt from the gate.
        match req.method.as_str() {
            "initialize" => return self.handle_initialize(req),
            "ping" => return Response::ok(req.id, serde_json::json!({"status": "pong"})),
            _ => {}
        }

        if !self.session.is_initialized() {
            warn!(method = %req.method, "rejecting request before initialization");
            let error = ErrorObject::not_initialized(&req.method);
            return Response::err(req.id, error);
        }

        match req.method.as_str() {
            "tools/list" => self.handle_tools_list(req),
            "tools/call" => self.handle_tools_call(req).await,
            _ => {
                warn!(method = %req.method, "unknown method");
                let error = ErrorObject::method_not_found(&req.method);
                Response::err(req.id, error)
            }
        }
    }

    /// Notifications never get a response; the interesting ones are logged.
    pub fn handle_notification(&self, notification: &Notification) {
        match notification.method.as_str() {
            "notifications/initialized" => debug!("client reports initialized"),
            method => debug!(method, "ignoring notification"),
        }
    }

    fn handle_initialize(&mut self, req: Request) -> Response {
        let Some(params) = req.params else {
            return Response::err(req.id, ErrorObject::invalid_params("missing params"));
        };
        let params: InitializeParams = match serde_json::from_value(params) {
            Ok(parsed) => parsed,
            Err(e) => return Response::err(req.id, ErrorObject::invalid_params(e.to_string())),
        };

        // Repeats re-confirm the recorded handshake; only the first call
        // negotiates and records.
        let negotiated = match self.session.negotiated() {
            Some(stored) => {
                let stored = stored.clone();
                info!(
                    protocol_version = %stored.protocol_version,
                    "re-confirming an already initialized session"
                );
                stored
            }
            None => {
                let negotiated = self.session.initialize(params);
                let client = negotiated
                    .client_info
                    .as_ref()
                    .map(|info| info.name.as_str())
                    .unwrap_or("unknown");
                info!(
                    protocol_version = %negotiated.protocol_version,
                    client,
                    "session initialized"
                );
                negotiated
            }
        };

        let result = InitializeResult {
            protocol_version: negotiated.protocol_version,
            capabilities: server_capabilities(),
            server_info: self.server_info.clone(),
        };
        ok_or_internal(req.id, &result)
    }

    fn handle_tools_list(&self, req: Request) -> Response {
        // Params (pagination cursors and the like) are accepted and ignored;
        // the full list always fits in one page.
        let result = ListToolsResult {
            tools: self.registry.definitions(),
        };
        debug!(tools = result.tools.len(), "listing tools");
        ok_or_internal(req.id, &result)
    }

    async fn handle_tools_call(&self, req: Request) -> Response {
        let Some(params) = req.params else {
            return Response::err(req.id, ErrorObject::invalid_params("missing params"));
        };
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(parsed) => parsed,
            Err(e) => return Response::err(req.id, ErrorObject::invalid_params(e.to_string())),
        };

        let Some(handler) = self.registry.resolve(&params.name) else {
            let suggestion = self.registry.suggest(&params.name);
            warn!(tool = %params.name, ?suggestion, "tool not found");
            let error = ErrorObject::tool_not_found(&params.name, suggestion);
            return Response::err(req.id, error);
        };

        let arguments = params.arguments.unwrap_or_default();
        let ctx = ToolContext {
            server: &self.server_info,
            tool_count: self.registry.len(),
        };
        // A fault inside the tool is a successful response with isError set;
        // the session and the loop carry on untouched.
        let result = match handler.call(&ctx, &arguments).await {
            Ok(result) => result,
            Err(fault) => {
                warn!(tool = %params.name, %fault, "tool reported a fault");
                ToolResult::error(fault.to_string())
            }
        };
        ok_or_internal(req.id, &result)
    }
}

/// Encodes a result under the request's id, downgrading to an internal error
/// response if serialization fails.
fn ok_or_internal<T: serde::Serialize>(id: RequestId, result: &T) -> Response {
    match serde_json::to_value(result) {
        Ok(value) => Response::ok(id, value),
        Err(e) => Response::err(id, ErrorObject::internal(e.to_string())),
    }
}
