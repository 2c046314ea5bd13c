//! Response envelope construction.
//!
//! Every response carries a fresh message id, and control responses carry a
//! sample timestamp. Both come from a [`Stamper`] so that callers can pin them.

use relay_types::{
    ContextProperty, DeviceSpec, EmptyPayload, Endpoint, EndpointsPayload, EventHeader,
    EventPayload, Namespace, PAYLOAD_VERSION, ResponseContext, ResponseEnvelope, ResponseEvent,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Uncertainty reported alongside every property sample.
pub const UNCERTAINTY_MS: u32 = 500;

/// Source of message ids and sample timestamps.
pub trait Stamper: Send + Sync {
    /// Returns a new unique message id.
    fn message_id(&self) -> String;

    /// Returns the current time as an RFC 3339 UTC string.
    fn timestamp(&self) -> String;
}

/// UUID v4 ids and the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemStamper;

impl Stamper for SystemStamper {
    fn message_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn timestamp(&self) -> String {
        // Formatting a UTC instant as RFC 3339 only fails for years outside
        // 0..=9999.
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default()
    }
}

/// A property changed by a control directive.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedProperty {
    /// Namespace owning the property.
    pub namespace: Namespace,
    /// Property name.
    pub name: &'static str,
    /// New value.
    pub value: serde_json::Value,
}

impl ChangedProperty {
    /// Describes a changed property.
    pub fn new(namespace: Namespace, name: &'static str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            namespace,
            name,
            value: value.into(),
        }
    }
}

/// Builds response envelopes with ids and timestamps from a [`Stamper`].
pub struct EnvelopeBuilder<'a> {
    stamper: &'a dyn Stamper,
}

impl<'a> EnvelopeBuilder<'a> {
    /// Wraps a stamper.
    pub fn new(stamper: &'a dyn Stamper) -> Self {
        Self { stamper }
    }

    /// Response to a control directive.
    ///
    /// The endpoint and correlation token are echoed unchanged. Without a
    /// changed property the context lists no properties.
    pub fn control_response(
        &self,
        changed: Option<ChangedProperty>,
        endpoint: Option<Endpoint>,
        correlation_token: Option<String>,
    ) -> ResponseEnvelope {
        let properties = changed
            .map(|property| ContextProperty {
                namespace: property.namespace.as_str().to_owned(),
                name: property.name.to_owned(),
                value: property.value,
                time_of_sample: self.stamper.timestamp(),
                uncertainty_in_milliseconds: UNCERTAINTY_MS,
            })
            .into_iter()
            .collect();

        ResponseEnvelope {
            context: Some(ResponseContext { properties }),
            event: ResponseEvent {
                header: self.header("Alexa", "Response", correlation_token),
                endpoint,
                payload: EventPayload::Empty(EmptyPayload::default()),
            },
        }
    }

    /// Response to `Alexa.Discovery / Discover`.
    pub fn discovery_response(&self, endpoints: Vec<DeviceSpec>) -> ResponseEnvelope {
        ResponseEnvelope {
            context: None,
            event: ResponseEvent {
                header: self.header(Namespace::Discovery.as_str(), "Discover.Response", None),
                endpoint: None,
                payload: EventPayload::Endpoints(EndpointsPayload { endpoints }),
            },
        }
    }

    /// Response to `Alexa.Authorization / AcceptGrant`.
    pub fn grant_response(&self) -> ResponseEnvelope {
        ResponseEnvelope {
            context: None,
            event: ResponseEvent {
                header: self.header(
                    Namespace::Authorization.as_str(),
                    "AcceptGrant.Response",
                    None,
                ),
                endpoint: None,
                payload: EventPayload::Empty(EmptyPayload::default()),
            },
        }
    }

    fn header(
        &self,
        namespace: &str,
        name: &str,
        correlation_token: Option<String>,
    ) -> EventHeader {
        EventHeader {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            payload_version: PAYLOAD_VERSION.to_owned(),
            message_id: self.stamper.message_id(),
            correlation_token,
        }
    }
}
