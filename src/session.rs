use crate::types::{ClientInfo, InitializeParams};

/// Protocol revisions this server can speak, latest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2024-11-05"];

/// Picks the revision to answer with: the requested one when supported,
/// otherwise the latest this server speaks.
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|version| *version == requested)
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}

/// Handshake outcome, recorded once per session.
#[derive(Debug, Clone)]
pub struct Negotiated {
    pub protocol_version: String,
    pub client_capabilities: serde_json::Value,
    pub client_info: Option<ClientInfo>,
}

/// Connection lifecycle. A session starts uninitialized and moves to
/// initialized on the first successful handshake; there is no way back.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initialized(Negotiated),
}

impl SessionState {
    pub fn is_initialized(&self) -> bool {
        matches!(self, SessionState::Initialized(_))
    }

    /// Applies an `initialize` request. The first call records the negotiated
    /// parameters; repeats leave them untouched and report what was already
    /// agreed, so every handshake response within a session is consistent.
    pub fn initialize(&mut self, params: InitializeParams) -> Negotiated {
        match self {
            SessionState::Uninitialized => {
                let negotiated = Negotiated {
                    protocol_version: negotiate_version(&params.protocol_version).to_string(),
                    client_capabilities: params.capabilities,
                    client_info: params.client_info,
                };
                *self = SessionState::Initialized(negotiated.clone());
                negotiated
            }
            SessionState::Initialized(negotiated) => negotiated.clone(),
        }
    }

    pub fn negotiated(&self) -> Option<&Negotiated> {
        match self {
            SessionState::Uninitialized => None,
            SessionState::Initialized(negotiated) => Some(negotiated),
        }
    }
}
