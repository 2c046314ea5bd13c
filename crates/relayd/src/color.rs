//! HSV to RGB conversion for colour commands.
//!
//! Device agents drive LEDs with 8-bit RGB channels, while the voice platform
//! sends hue in degrees plus saturation and brightness fractions. Inputs are
//! range-checked by the dispatcher before they reach [`hsv_to_rgb`].

use relay_types::Hsv;
use serde::Serialize;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// Builds a triple from its channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Converts a validated HSV colour to RGB.
///
/// Channels are rounded half away from zero. A hue of exactly 360 degrees wraps
/// to the red sector.
#[must_use]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let saturation = hsv.saturation;
    let value = (hsv.brightness * 255.0).round();
    let scaled = hsv.hue / 360.0 * 6.0;
    let whole = scaled.floor();
    let fraction = scaled - whole;

    let v = channel(value);
    let p = channel(value * (1.0 - saturation));
    let q = channel(value * (1.0 - fraction * saturation));
    let t = channel(value * (1.0 - (1.0 - fraction) * saturation));

    match sector(whole) {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

// Rounded and clamped before the cast, so the conversion is lossless.
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn sector(whole: f64) -> i64 {
    (whole as i64).rem_euclid(6)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, Rgb::new(255, 0, 0))]
    #[case(60.0, Rgb::new(255, 255, 0))]
    #[case(120.0, Rgb::new(0, 255, 0))]
    #[case(180.0, Rgb::new(0, 255, 255))]
    #[case(240.0, Rgb::new(0, 0, 255))]
    #[case(300.0, Rgb::new(255, 0, 255))]
    #[case(359.999, Rgb::new(255, 0, 0))]
    #[case(360.0, Rgb::new(255, 0, 0))]
    fn saturated_sector_boundaries(#[case] hue: f64, #[case] expected: Rgb) {
        assert_eq!(hsv_to_rgb(Hsv::new(hue, 1.0, 1.0)), expected);
    }

    #[test]
    fn rounds_intermediate_channels() {
        assert_eq!(hsv_to_rgb(Hsv::new(30.0, 1.0, 1.0)), Rgb::new(255, 128, 0));
        assert_eq!(
            hsv_to_rgb(Hsv::new(350.5, 0.7138, 0.6524)),
            Rgb::new(166, 48, 66)
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(200.0)]
    fn zero_saturation_is_grey(#[case] hue: f64) {
        assert_eq!(hsv_to_rgb(Hsv::new(hue, 0.0, 0.5)), Rgb::new(128, 128, 128));
    }

    #[test]
    fn zero_brightness_is_black() {
        assert_eq!(hsv_to_rgb(Hsv::new(120.0, 1.0, 0.0)), Rgb::new(0, 0, 0));
    }
}
