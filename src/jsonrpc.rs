use serde::{Deserialize, Serialize};

// Reserved JSON-RPC 2.0 error codes.
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// Implementation-defined server errors (-32000..=-32099 band).
pub const TOOL_NOT_FOUND: i64 = -32001;
pub const NOT_INITIALIZED: i64 = -32002;

/// Correlation id attached to a request. Responses echo it back verbatim, so
/// the sender's JSON type (string, number, or null) must survive the round
/// trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
    Null,
}

/// A structurally valid incoming request. Exactly one response is owed for it.
#[derive(Debug, Clone)]
pub struct Request {
    pub id: RequestId,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// An incoming message without an `id`. Never answered on the wire.
#[derive(Debug, Clone)]
pub struct Notification {
    pub method: String,
    pub params: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub enum Incoming {
    Request(Request),
    Notification(Notification),
}

/// A line that cannot become a `Request`. Carries everything needed to build
/// the error response owed for it.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Not parseable as JSON at all; the sender's id is unknowable.
    Parse { detail: String },
    /// Parsed, but not a JSON-RPC 2.0 request object.
    InvalidRequest { id: RequestId, detail: String },
}

impl DecodeError {
    pub fn into_response(self) -> Response {
        match self {
            DecodeError::Parse { detail } => {
                Response::err(RequestId::Null, ErrorObject::parse_error(detail))
            }
            DecodeError::InvalidRequest { id, detail } => {
                Response::err(id, ErrorObject::invalid_request(detail))
            }
        }
    }
}

/// Classifies one raw input line.
///
/// Framing guarantees one JSON document per line, so every failure maps to a
/// concrete error response: unparseable input reports `PARSE_ERROR` with a
/// null id, structurally wrong JSON-RPC reports `INVALID_REQUEST` with the
/// sender's id whenever one can be recovered.
pub fn decode(line: &str) -> Result<Incoming, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| DecodeError::Parse {
            detail: e.to_string(),
        })?;

    let obj = match value {
        serde_json::Value::Object(obj) => obj,
        serde_json::Value::Array(_) => {
            return Err(DecodeError::InvalidRequest {
                id: RequestId::Null,
                detail: "batch requests are not supported".to_string(),
            })
        }
        other => {
            return Err(DecodeError::InvalidRequest {
                id: RequestId::Null,
                detail: format!("expected a request object, got {}", json_type_name(&other)),
            })
        }
    };

    // The id comes out first so later failures can cite it. An absent id is
    // what makes a notification; a literal null id is still a request.
    let id = match obj.get("id") {
        None => None,
        Some(raw) => match serde_json::from_value::<RequestId>(raw.clone()) {
            Ok(id) => Some(id),
            Err(_) => {
                return Err(DecodeError::InvalidRequest {
                    id: RequestId::Null,
                    detail: "id must be a string, an integer, or null".to_string(),
                })
            }
        },
    };
    let cited = id.clone().unwrap_or(RequestId::Null);

    match obj.get("jsonrpc") {
        // Tolerated when absent, but must be "2.0" when present.
        None => {}
        Some(serde_json::Value::String(version)) if version == "2.0" => {}
        Some(other) => {
            return Err(DecodeError::InvalidRequest {
                id: cited,
                detail: format!("unsupported jsonrpc version: {other}"),
            })
        }
    }

    let method = match obj.get("method") {
        Some(serde_json::Value::String(method)) => method.clone(),
        Some(_) => {
            return Err(DecodeError::InvalidRequest {
                id: cited,
                detail: "method must be a string".to_string(),
            })
        }
        None => {
            return Err(DecodeError::InvalidRequest {
                id: cited,
                detail: "missing method".to_string(),
            })
        }
    };

    let params = obj.get("params").cloned();

    Ok(match id {
        Some(id) => Incoming::Request(Request { id, method, params }),
        None => Incoming::Notification(Notification { method, params }),
    })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Outgoing response envelope. Exactly one of `result`/`error` is present on
/// the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl Response {
    pub fn ok(id: RequestId, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: RequestId, error: ErrorObject) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorObject {
    fn with_detail(code: i64, message: &str, detail: impl Into<String>) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: Some(serde_json::json!({ "detail": detail.into() })),
        }
    }

    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::with_detail(PARSE_ERROR, "parse error", detail)
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::with_detail(INVALID_REQUEST, "invalid request", detail)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::with_detail(INVALID_PARAMS, "invalid params", detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::with_detail(INTERNAL_ERROR, "internal error", detail)
    }

    pub fn not_initialized(method: &str) -> Self {
        Self {
            code: NOT_INITIALIZED,
            message: format!("server not initialized: call initialize before {method}"),
            data: None,
        }
    }

    /// Unknown tool names get their own code plus the requested name (and a
    /// near-miss suggestion when one stands out) so callers can self-correct.
    pub fn tool_not_found(tool: &str, suggestion: Option<&str>) -> Self {
        let mut data = serde_json::Map::new();
        data.insert("tool".to_string(), serde_json::Value::String(tool.to_string()));
        if let Some(name) = suggestion {
            data.insert(
                "suggestion".to_string(),
                serde_json::Value::String(name.to_string()),
            );
        }
        let message = match suggestion {
            Some(name) => format!("tool not found: {tool} (did you mean '{name}'?)"),
            None => format!("tool not found: {tool}"),
        };
        Self {
            code: TOOL_NOT_FOUND,
            message,
            data: Some(serde_json::Value::Object(data)),
        }
    }
}
