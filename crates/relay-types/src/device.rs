//! Platform-facing device descriptions returned by discovery.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::namespace::Namespace;

/// Display category advertised for a device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayCategory {
    /// Light bulbs, strips and fixtures.
    Light,
    /// Televisions.
    Tv,
    /// Speakers and amplifiers.
    Speaker,
    /// Anything else.
    Other,
}

/// Errors encountered while parsing a [`DisplayCategory`] from text.
pub type DisplayCategoryParseError = strum::ParseError;

/// A discovered controllable endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSpec {
    /// Stable device identifier, unique within a discovery response.
    pub endpoint_id: String,
    /// Manufacturer shown in the companion app.
    pub manufacturer_name: String,
    /// Device model version.
    pub version: String,
    /// Name users address the device by.
    pub friendly_name: String,
    /// Human-readable description.
    pub description: String,
    /// Single display category, wrapped in the list the platform expects.
    pub display_categories: Vec<DisplayCategory>,
    /// Capability descriptors in advertisement order.
    pub capabilities: Vec<Capability>,
    /// Routing metadata echoed back on later control directives.
    pub cookie: BTreeMap<String, String>,
}

/// A capability interface descriptor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    /// Always `AlexaInterface`.
    #[serde(rename = "type")]
    pub capability_type: &'static str,
    /// Namespace implemented by the device.
    pub interface: Namespace,
    /// Interface version.
    pub version: &'static str,
    /// Reportable properties, when the interface has any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,
    /// Supported operations for property-less interfaces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_operations: Option<Vec<&'static str>>,
}

/// Property metadata advertised for an interface.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    /// Names of the supported properties.
    pub supported: Vec<SupportedProperty>,
    /// Whether state changes are pushed proactively.
    pub proactively_reported: bool,
    /// Whether state can be queried.
    pub retrievable: bool,
}

/// A single supported property name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SupportedProperty {
    /// Property name, for example `powerState`.
    pub name: &'static str,
}
