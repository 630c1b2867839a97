//! Conversion between 8-bit RGB pixels and the 16-bit HSBK color space
//! understood by the bulbs.

use smart_leds::RGB8;

/// Neutral white point. The bulbs only consult the kelvin channel when the
/// saturation is zero, so a single fixed value is enough for playback.
pub const NEUTRAL_KELVIN: u16 = 3500;

/// A device color: hue, saturation, brightness and kelvin, 16 bits each.
///
/// Hue maps `0..=65535` onto `0..360` degrees, saturation and brightness map
/// onto `0..=100%`. Values are immutable; the send pipeline produces a fresh
/// one per frame per light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsbk {
    pub hue: u16,
    pub saturation: u16,
    pub brightness: u16,
    pub kelvin: u16,
}

impl Hsbk {
    /// Converts an 8-bit RGB pixel with the standard RGB to HSV formula,
    /// quantizing each channel to the 16-bit range.
    ///
    /// The conversion is lossy in both directions: a round trip through
    /// [`Self::to_rgb`] may differ from the source by one unit per channel.
    #[must_use]
    pub fn from_rgb(rgb: RGB8) -> Self {
        let max = rgb.r.max(rgb.g).max(rgb.b);
        let min = rgb.r.min(rgb.g).min(rgb.b);
        let delta = f32::from(max - min);

        let mut hue = if max == min {
            0.0
        } else if max == rgb.r {
            60.0 * ((f32::from(rgb.g) - f32::from(rgb.b)) / delta)
        } else if max == rgb.g {
            60.0 * (2.0 + (f32::from(rgb.b) - f32::from(rgb.r)) / delta)
        } else {
            60.0 * (4.0 + (f32::from(rgb.r) - f32::from(rgb.g)) / delta)
        };
        // The raw formula yields values in -60..360; wrap the negative ones.
        if hue < 0.0 {
            hue += 360.0;
        }

        let saturation = if max == 0 { 0.0 } else { delta / f32::from(max) };
        let brightness = f32::from(max) / f32::from(u8::MAX);

        Self {
            hue: scale_to_u16(hue / 360.0),
            saturation: scale_to_u16(saturation),
            brightness: scale_to_u16(brightness),
            kelvin: NEUTRAL_KELVIN,
        }
    }

    /// Converts back to an 8-bit RGB pixel with the inverse HSV formula.
    #[must_use]
    pub fn to_rgb(self) -> RGB8 {
        let hue = f32::from(self.hue) / f32::from(u16::MAX) * 360.0;
        let saturation = f32::from(self.saturation) / f32::from(u16::MAX);
        let brightness = f32::from(self.brightness) / f32::from(u16::MAX);

        let chroma = brightness * saturation;
        let hue_prime = hue / 60.0;
        let x = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());
        let (r, g, b) = if hue_prime <= 1.0 {
            (chroma, x, 0.0)
        } else if hue_prime <= 2.0 {
            (x, chroma, 0.0)
        } else if hue_prime <= 3.0 {
            (0.0, chroma, x)
        } else if hue_prime <= 4.0 {
            (0.0, x, chroma)
        } else if hue_prime <= 5.0 {
            (x, 0.0, chroma)
        } else {
            (chroma, 0.0, x)
        };
        let offset = brightness - chroma;

        RGB8 {
            r: channel_to_u8(r + offset),
            g: channel_to_u8(g + offset),
            b: channel_to_u8(b + offset),
        }
    }

    /// Scales the brightness channel by the given non-negative factor,
    /// saturating at the 16-bit maximum.
    #[must_use]
    pub fn scale_brightness(mut self, factor: f32) -> Self {
        let scaled = (f32::from(self.brightness) * factor).round();
        self.brightness = scaled.min(f32::from(u16::MAX)) as u16;
        self
    }
}

fn scale_to_u16(fraction: f32) -> u16 {
    (fraction * f32::from(u16::MAX)).round() as u16
}

fn channel_to_u8(value: f32) -> u8 {
    (value * f32::from(u8::MAX)).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{Hsbk, NEUTRAL_KELVIN};
    use smart_leds::RGB8;

    #[test]
    fn known_values() {
        let black = Hsbk::from_rgb(RGB8::new(0, 0, 0));
        assert_eq!((black.hue, black.saturation, black.brightness), (0, 0, 0));
        assert_eq!(black.kelvin, NEUTRAL_KELVIN);

        let white = Hsbk::from_rgb(RGB8::new(255, 255, 255));
        assert_eq!((white.hue, white.saturation, white.brightness), (0, 0, 65535));

        let red = Hsbk::from_rgb(RGB8::new(255, 0, 0));
        assert_eq!((red.hue, red.saturation, red.brightness), (0, 65535, 65535));
    }

    #[test]
    fn negative_hue_is_wrapped() {
        // Magenta sits at 300 degrees; the raw formula yields -60 for it.
        let magenta = Hsbk::from_rgb(RGB8::new(255, 0, 255));
        let expected = (300.0_f32 / 360.0 * 65535.0).round() as u16;
        assert!(magenta.hue.abs_diff(expected) <= 1, "hue {}", magenta.hue);
    }

    #[test]
    fn round_trip_is_quantization_bounded() {
        // Sampling the whole cube on a coarse lattice keeps the test fast
        // while still hitting every hue sextant and the gray diagonal.
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let source = RGB8::new(r as u8, g as u8, b as u8);
                    let restored = Hsbk::from_rgb(source).to_rgb();
                    assert!(
                        source.r.abs_diff(restored.r) <= 1
                            && source.g.abs_diff(restored.g) <= 1
                            && source.b.abs_diff(restored.b) <= 1,
                        "{source:?} -> {restored:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn brightness_scaling_rounds_and_saturates() {
        let full = Hsbk {
            hue: 0,
            saturation: 0,
            brightness: 65535,
            kelvin: NEUTRAL_KELVIN,
        };
        assert_eq!(full.scale_brightness(0.5).brightness, 32768);
        assert_eq!(full.scale_brightness(2.0).brightness, 65535);
        assert_eq!(full.scale_brightness(0.0).brightness, 0);
    }
}
