//! Capability namespaces understood by the adapter.

use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Known directive namespaces.
///
/// The enumeration is non-exhaustive: downstream routing tables must carry a
/// fallback arm so that a namespace added here without a matching handler is
/// reported loudly instead of silently ignored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[non_exhaustive]
pub enum Namespace {
    /// Device discovery.
    #[strum(serialize = "Alexa.Discovery")]
    Discovery,
    /// Account linking grants.
    #[strum(serialize = "Alexa.Authorization")]
    Authorization,
    /// On/off control.
    #[strum(serialize = "Alexa.PowerController")]
    PowerController,
    /// Brightness control.
    #[strum(serialize = "Alexa.BrightnessController")]
    BrightnessController,
    /// Colour control.
    #[strum(serialize = "Alexa.ColorController")]
    ColorController,
    /// White-spectrum colour temperature control.
    #[strum(serialize = "Alexa.ColorTemperatureController")]
    ColorTemperatureController,
    /// Media transport control.
    #[strum(serialize = "Alexa.PlaybackController")]
    PlaybackController,
}

impl Namespace {
    /// Parses a wire namespace string. Matching is exact.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case("Alexa.Discovery", Namespace::Discovery)]
    #[case("Alexa.PowerController", Namespace::PowerController)]
    #[case("Alexa.ColorTemperatureController", Namespace::ColorTemperatureController)]
    #[case("Alexa.PlaybackController", Namespace::PlaybackController)]
    fn parses_wire_names(#[case] wire: &str, #[case] expected: Namespace) {
        assert_eq!(Namespace::parse(wire), Some(expected));
    }

    #[rstest]
    #[case("alexa.discovery")]
    #[case("Alexa.ThermostatController")]
    #[case("")]
    fn rejects_unknown_names(#[case] wire: &str) {
        assert_eq!(Namespace::parse(wire), None);
    }

    #[test]
    fn serialises_power_controller_wire_name() {
        let json = serde_json::to_string(&Namespace::PowerController).expect("serialise");
        assert_eq!(json, r#""Alexa.PowerController""#);
    }

    #[test]
    fn serialises_to_wire_name() {
        for namespace in Namespace::iter() {
            let json = serde_json::to_string(&namespace).expect("serialise namespace");
            assert_eq!(json, format!("\"{}\"", namespace.as_str()));
            assert_eq!(namespace.to_string(), namespace.as_str());
            assert_eq!(Namespace::parse(namespace.as_str()), Some(namespace));
        }
    }
}
