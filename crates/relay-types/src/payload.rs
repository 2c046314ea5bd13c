//! Typed directive payloads.
//!
//! Each handler deserialises the raw `payload` value into one of these
//! structures. Numeric ranges are checked by the dispatcher, not here.

use serde::{Deserialize, Serialize};

use crate::directive::Scope;

/// `Alexa.Discovery/Discover` payload.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DiscoverPayload {
    /// Scope holding the user's bearer token.
    pub scope: Option<Scope>,
}

/// `Alexa.Authorization/AcceptGrant` payload.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AcceptGrantPayload {
    /// Authorisation grant issued to the skill.
    pub grant: Grant,
    /// Scope of the user who granted access.
    #[serde(default)]
    pub grantee: Option<Scope>,
}

/// OAuth grant carried by `AcceptGrant`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Grant {
    /// Grant type, typically `OAuth2.AuthorizationCode`.
    #[serde(rename = "type")]
    pub grant_type: String,
    /// Authorisation code.
    pub code: String,
}

/// `Alexa.BrightnessController/SetBrightness` payload.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct BrightnessPayload {
    /// Target brightness percentage.
    pub brightness: i64,
}

/// `Alexa.ColorController/SetColor` payload.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ColorPayload {
    /// Target colour.
    pub color: Hsv,
}

/// `Alexa.ColorTemperatureController/SetColorTemperature` payload.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColorTemperaturePayload {
    /// Target white temperature in kelvin.
    pub color_temperature_in_kelvin: i64,
}

/// Colour expressed as hue, saturation and brightness.
///
/// Hue is in degrees; saturation and brightness are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hsv {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation fraction.
    pub saturation: f64,
    /// Brightness (value) fraction.
    pub brightness: f64,
}

impl Hsv {
    /// Creates a colour from its components.
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colour_payload() {
        let payload: ColorPayload = serde_json::from_str(
            r#"{"color":{"hue":350.5,"saturation":0.7138,"brightness":0.6524}}"#,
        )
        .expect("parse colour");
        assert_eq!(payload.color, Hsv::new(350.5, 0.7138, 0.6524));
    }

    #[test]
    fn brightness_must_be_integral() {
        let result = serde_json::from_str::<BrightnessPayload>(r#"{"brightness":42.5}"#);
        assert!(result.is_err(), "fractional brightness should not parse");
    }

    #[test]
    fn parses_colour_temperature_payload() {
        let payload: ColorTemperaturePayload =
            serde_json::from_str(r#"{"colorTemperatureInKelvin":2700}"#)
                .expect("parse colour temperature");
        assert_eq!(payload.color_temperature_in_kelvin, 2700);
    }

    #[test]
    fn parses_accept_grant_payload() {
        let payload: AcceptGrantPayload = serde_json::from_str(
            r#"{"grant":{"type":"OAuth2.AuthorizationCode","code":"ANLIbUFc"},
                "grantee":{"type":"BearerToken","token":"Atza|token"}}"#,
        )
        .expect("parse grant");
        assert_eq!(payload.grant.code, "ANLIbUFc");
        assert_eq!(payload.grantee, Some(Scope::bearer("Atza|token")));
    }
}
