//! Wire types shared by the relay directive adapter.
//!
//! The voice platform speaks a JSON envelope protocol: every inbound message
//! wraps a [`Directive`] carrying a header (namespace, name, correlation
//! token), an optional [`Endpoint`] and a namespace-specific payload. Replies
//! are [`ResponseEnvelope`] values that echo the correlation token and
//! endpoint back so the platform can pair them with the original request.
//!
//! Discovery replies list [`DeviceSpec`] entries translated from the per-user
//! [`DiscoveryDocument`] written out-of-band by the provisioning process.
//!
//! The types in this crate carry no behaviour beyond (de)serialisation and
//! small accessors; validation and routing live in `relayd`.
//!
//! # Example
//!
//! ```
//! use relay_types::{DirectiveEnvelope, Namespace};
//!
//! let raw = r#"{"directive":{"header":{"namespace":"Alexa.PowerController",
//!     "name":"TurnOn","correlationToken":"c1"},"payload":{}}}"#;
//! let envelope: DirectiveEnvelope = serde_json::from_str(raw).expect("valid directive");
//! assert_eq!(
//!     Namespace::parse(envelope.directive.header.namespace.as_str()),
//!     Some(Namespace::PowerController)
//! );
//! ```

mod device;
mod directive;
mod document;
mod namespace;
mod payload;
mod response;

pub use self::device::{
    Capability, CapabilityProperties, DeviceSpec, DisplayCategory, DisplayCategoryParseError,
    SupportedProperty,
};
pub use self::directive::{Directive, DirectiveEnvelope, DirectiveHeader, Endpoint, Scope};
pub use self::document::{CapabilityCode, DiscoveryDocument, DocumentDevice};
pub use self::namespace::Namespace;
pub use self::payload::{
    AcceptGrantPayload, BrightnessPayload, ColorPayload, ColorTemperaturePayload,
    DiscoverPayload, Grant, Hsv,
};
pub use self::response::{
    ContextProperty, EmptyPayload, EndpointsPayload, EventHeader, EventPayload, ResponseContext,
    ResponseEnvelope, ResponseEvent,
};

/// Payload schema version stamped on every response header.
pub const PAYLOAD_VERSION: &str = "3";

/// Scope type accepted for bearer-token authorisation.
pub const BEARER_TOKEN: &str = "BearerToken";
