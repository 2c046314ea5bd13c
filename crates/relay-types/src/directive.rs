//! Inbound directive envelope.
//!
//! Fields that the platform may omit are modelled as `Option` so that a
//! missing endpoint or token becomes a validation failure in the dispatcher
//! rather than a deserialisation error. The endpoint is echoed back verbatim
//! in control responses, so it round-trips through `Serialize` unchanged
//! apart from omitting absent fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level inbound message carrying a directive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectiveEnvelope {
    /// The wrapped directive.
    pub directive: Directive,
}

/// An instruction from the voice platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Directive {
    /// Routing header.
    pub header: DirectiveHeader,
    /// Target device reference, present on control directives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    /// Namespace-specific parameters, parsed lazily by the handler.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Directive header identifying the namespace and command verb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveHeader {
    /// Capability family, for example `Alexa.PowerController`.
    pub namespace: String,
    /// Command verb within the namespace, for example `TurnOn`.
    pub name: String,
    /// Platform-assigned message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Opaque value that must be echoed on the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
    /// Payload schema version announced by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_version: Option<String>,
}

/// Target device reference attached to control directives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Authorisation scope forwarded by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// Device identifier assigned during discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    /// Opaque metadata propagated from discovery.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cookie: BTreeMap<String, String>,
}

impl Endpoint {
    /// Returns the cookie entry for `key`, if present.
    #[must_use]
    pub fn cookie_value(&self, key: &str) -> Option<&str> {
        self.cookie.get(key).map(String::as_str)
    }
}

/// Authorisation scope carrying a bearer token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scope {
    /// Scope type; only `BearerToken` is accepted.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<String>,
    /// The bearer token itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Scope {
    /// Creates a bearer-token scope.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            scope_type: Some(crate::BEARER_TOKEN.to_owned()),
            token: Some(token.into()),
        }
    }
}
