//! Translation of stored discovery documents into platform device lists.

use std::collections::BTreeMap;

use relay_types::{
    Capability, CapabilityCode, CapabilityProperties, DeviceSpec, DiscoveryDocument,
    DisplayCategory, DocumentDevice, Namespace, PAYLOAD_VERSION, SupportedProperty,
};

use crate::dispatch::DispatchError;

/// Device model version advertised for every endpoint.
pub const DEVICE_VERSION: &str = "1.0";

/// Cookie key carrying the destination queue.
pub const QUEUE_COOKIE: &str = "queue";

const INTERFACE_TYPE: &str = "AlexaInterface";
const PLAYBACK_OPERATIONS: [&str; 3] = ["Play", "Pause", "Stop"];

/// Translates `document` into the device list returned by discovery.
///
/// Only light devices are supported; any other category fails the whole
/// translation so that a partial device list is never advertised.
///
/// # Errors
///
/// Returns [`DispatchError::Validation`] for a non-light device and
/// [`DispatchError::Unreachable`] for a capability code without a descriptor.
pub fn to_device_list(
    document: &DiscoveryDocument,
    manufacturer: &str,
) -> Result<Vec<DeviceSpec>, DispatchError> {
    document
        .devices
        .iter()
        .map(|device| translate_device(device, &document.queue, manufacturer))
        .collect()
}

fn translate_device(
    device: &DocumentDevice,
    queue: &str,
    manufacturer: &str,
) -> Result<DeviceSpec, DispatchError> {
    let category = device
        .display_category
        .parse::<DisplayCategory>()
        .ok()
        .filter(|category| *category == DisplayCategory::Light)
        .ok_or_else(|| {
            DispatchError::validation(format!(
                "device '{}' has unsupported display category '{}'",
                device.id, device.display_category
            ))
        })?;

    let capabilities = device
        .capability_codes
        .iter()
        .map(|code| capability_for(*code))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DeviceSpec {
        endpoint_id: device.id.clone(),
        manufacturer_name: manufacturer.to_owned(),
        version: DEVICE_VERSION.to_owned(),
        friendly_name: device.friendly_name.clone(),
        description: device.description.clone(),
        display_categories: vec![category],
        capabilities,
        cookie: BTreeMap::from([(QUEUE_COOKIE.to_owned(), queue.to_owned())]),
    })
}

fn capability_for(code: CapabilityCode) -> Result<Capability, DispatchError> {
    let capability = match code {
        CapabilityCode::PowerController => {
            with_property(Namespace::PowerController, "powerState")
        }
        CapabilityCode::BrightnessController => {
            with_property(Namespace::BrightnessController, "brightness")
        }
        CapabilityCode::ColorController => with_property(Namespace::ColorController, "color"),
        CapabilityCode::ColorTemperatureController => with_property(
            Namespace::ColorTemperatureController,
            "colorTemperatureInKelvin",
        ),
        CapabilityCode::PlaybackController => Capability {
            capability_type: INTERFACE_TYPE,
            interface: Namespace::PlaybackController,
            version: PAYLOAD_VERSION,
            properties: None,
            supported_operations: Some(PLAYBACK_OPERATIONS.to_vec()),
        },
        other => {
            return Err(DispatchError::unreachable(format!(
                "no capability descriptor for {other:?}"
            )));
        }
    };
    Ok(capability)
}

fn with_property(interface: Namespace, property: &'static str) -> Capability {
    Capability {
        capability_type: INTERFACE_TYPE,
        interface,
        version: PAYLOAD_VERSION,
        properties: Some(CapabilityProperties {
            supported: vec![SupportedProperty { name: property }],
            proactively_reported: false,
            retrievable: false,
        }),
        supported_operations: None,
    }
}
