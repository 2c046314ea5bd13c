//! Response envelopes returned to the voice platform.

use serde::Serialize;

use crate::device::DeviceSpec;
use crate::directive::Endpoint;

/// Synchronous reply to a directive.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseEnvelope {
    /// Property snapshot; present on control responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ResponseContext>,
    /// The response event.
    pub event: ResponseEvent,
}

/// Context block listing properties changed by a control directive.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseContext {
    /// Changed properties; empty when nothing reportable changed.
    pub properties: Vec<ContextProperty>,
}

/// A property value reported after a control directive.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContextProperty {
    /// Namespace owning the property.
    pub namespace: String,
    /// Property name, for example `powerState`.
    pub name: String,
    /// Property value; shape depends on the property.
    pub value: serde_json::Value,
    /// RFC 3339 timestamp of the sample.
    pub time_of_sample: String,
    /// Sample uncertainty window.
    pub uncertainty_in_milliseconds: u32,
}

/// Response event body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseEvent {
    /// Response header.
    pub header: EventHeader,
    /// Endpoint echoed from the directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    /// Response payload.
    pub payload: EventPayload,
}

/// Header stamped on every response event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    /// Response namespace.
    pub namespace: String,
    /// Response name, for example `Response` or `Discover.Response`.
    pub name: String,
    /// Payload schema version.
    pub payload_version: String,
    /// Fresh identifier for this response.
    pub message_id: String,
    /// Correlation token copied from the directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
}

/// Response payload variants.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EventPayload {
    /// Device list returned by discovery.
    Endpoints(EndpointsPayload),
    /// Empty object.
    Empty(EmptyPayload),
}

/// Discovery payload listing devices.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EndpointsPayload {
    /// Translated devices.
    pub endpoints: Vec<DeviceSpec>,
}

/// Serialises as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct EmptyPayload {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_serialises_as_object() {
        let payload = EventPayload::Empty(EmptyPayload::default());
        let json = serde_json::to_string(&payload).expect("serialise payload");
        assert_eq!(json, "{}");
    }

    #[test]
    fn envelope_without_context_omits_it() {
        let envelope = ResponseEnvelope {
            context: None,
            event: ResponseEvent {
                header: EventHeader {
                    namespace: "Alexa.Discovery".to_owned(),
                    name: "Discover.Response".to_owned(),
                    payload_version: crate::PAYLOAD_VERSION.to_owned(),
                    message_id: "mock-id".to_owned(),
                    correlation_token: None,
                },
                endpoint: None,
                payload: EventPayload::Endpoints(EndpointsPayload {
                    endpoints: Vec::new(),
                }),
            },
        };

        let json = serde_json::to_value(&envelope).expect("serialise envelope");
        assert!(json.get("context").is_none());
        assert_eq!(
            json.pointer("/event/header/messageId"),
            Some(&serde_json::Value::from("mock-id"))
        );
        assert_eq!(
            json.pointer("/event/payload/endpoints"),
            Some(&serde_json::json!([]))
        );
        assert!(json.pointer("/event/header/correlationToken").is_none());
    }
}
