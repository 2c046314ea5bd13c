//! Outbound command messages for the device-control agent.
//!
//! A message is a verb, one space, then a compact JSON object. The agent
//! splits on the first space and decodes the object positionally, so field
//! order is part of the wire format. Every parameter block is a dedicated
//! struct; `serde` emits struct fields in declaration order.

use relay_types::Hsv;
use serde::Serialize;

use crate::color::hsv_to_rgb;

/// A command message paired with its destination queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCommand {
    /// Destination queue, taken from the endpoint cookie.
    pub queue: String,
    /// Encoded `verb {json}` message.
    pub body: String,
}

impl OutboundCommand {
    /// Pairs a message with its queue.
    #[must_use]
    pub fn new(queue: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            body: body.into(),
        }
    }
}

#[derive(Serialize)]
struct DeviceParams<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct BrightnessParams<'a> {
    id: &'a str,
    brightness: u8,
}

#[derive(Serialize)]
struct ColorParams<'a> {
    id: &'a str,
    red: u8,
    green: u8,
    blue: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColorTemperatureParams<'a> {
    id: &'a str,
    color_temperature_in_kelvin: u32,
}

#[derive(Serialize)]
struct PlaybackParams<'a> {
    id: &'a str,
    action: &'a str,
}

fn encode<T: Serialize>(verb: &str, params: &T) -> String {
    // Serialising a struct of strings and integers into a `String` cannot fail.
    let json = serde_json::to_string(params).unwrap_or_default();
    format!("{verb} {json}")
}

/// `turn_on {"id":..}`.
#[must_use]
pub fn turn_on_message(id: &str) -> String {
    encode("turn_on", &DeviceParams { id })
}

/// `turn_off {"id":..}`.
#[must_use]
pub fn turn_off_message(id: &str) -> String {
    encode("turn_off", &DeviceParams { id })
}

/// `brightness {"id":..,"brightness":..}` with brightness in percent.
#[must_use]
pub fn brightness_message(id: &str, brightness: u8) -> String {
    encode("brightness", &BrightnessParams { id, brightness })
}

/// `color {"id":..,"red":..,"green":..,"blue":..}` after HSV conversion.
#[must_use]
pub fn color_message(id: &str, hsv: Hsv) -> String {
    let rgb = hsv_to_rgb(hsv);
    encode(
        "color",
        &ColorParams {
            id,
            red: rgb.red,
            green: rgb.green,
            blue: rgb.blue,
        },
    )
}

/// `colorTemperature {"id":..,"colorTemperatureInKelvin":..}`.
#[must_use]
pub fn color_temperature_message(id: &str, kelvin: u32) -> String {
    encode(
        "colorTemperature",
        &ColorTemperatureParams {
            id,
            color_temperature_in_kelvin: kelvin,
        },
    )
}

/// `playback {"id":..,"action":..}` where `action` is the directive name.
#[must_use]
pub fn playback_control_message(id: &str, action: &str) -> String {
    encode("playback", &PlaybackParams { id, action })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_power_messages() {
        assert_eq!(turn_on_message("abc123"), r#"turn_on {"id":"abc123"}"#);
        assert_eq!(turn_off_message("abc123"), r#"turn_off {"id":"abc123"}"#);
    }

    #[test]
    fn encodes_brightness_in_field_order() {
        assert_eq!(
            brightness_message("lamp-1", 42),
            r#"brightness {"id":"lamp-1","brightness":42}"#
        );
    }

    #[test]
    fn encodes_colour_as_rgb() {
        assert_eq!(
            color_message("strip", Hsv::new(350.5, 0.7138, 0.6524)),
            r#"color {"id":"strip","red":166,"green":48,"blue":66}"#
        );
    }

    #[test]
    fn encodes_colour_temperature() {
        assert_eq!(
            color_temperature_message("bulb", 2700),
            r#"colorTemperature {"id":"bulb","colorTemperatureInKelvin":2700}"#
        );
    }

    #[test]
    fn encodes_playback_action() {
        assert_eq!(
            playback_control_message("tv", "Pause"),
            r#"playback {"id":"tv","action":"Pause"}"#
        );
    }

    #[test]
    fn escapes_identifiers() {
        assert_eq!(
            turn_on_message(r#"quo"te"#),
            r#"turn_on {"id":"quo\"te"}"#
        );
    }
}
