/// An 8-bit RGB color as the OXI ONE pad LEDs take it. Each component spans the full `0..=255`
/// range; the wire encoding splits every component into two protocol-safe bytes.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0, g: 0, b: 0 };
    pub const WHITE: RgbColor = RgbColor { r: 255, g: 255, b: 255 };
    pub const RED: RgbColor = RgbColor { r: 255, g: 0, b: 0 };
    pub const GREEN: RgbColor = RgbColor { r: 0, g: 255, b: 0 };
    pub const BLUE: RgbColor = RgbColor { r: 0, g: 0, b: 255 };
    pub const YELLOW: RgbColor = RgbColor { r: 255, g: 255, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert a float color with components in `0.0..=1.0`, the way DAW clip colors are
    /// usually reported. Components outside that range are clipped.
    ///
    /// ```
    /// # use oxi_one::RgbColor;
    /// assert_eq!(RgbColor::from_normalized(1.0, 0.5, -3.0), RgbColor::new(255, 128, 0));
    /// ```
    pub fn from_normalized(r: f32, g: f32, b: f32) -> Self {
        let quantize = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(quantize(r), quantize(g), quantize(b))
    }

    /// Multiply every component by `factor`, clipped to the valid range
    pub fn scale(self, factor: f32) -> Self {
        let scale = |x: u8| (x as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_normalized_clamps() {
        assert_eq!(RgbColor::from_normalized(0.0, 1.0, 2.0), RgbColor::new(0, 255, 255));
        assert_eq!(RgbColor::from_normalized(0.25, 0.0, 0.0).r, 64);
    }

    #[test]
    fn test_scale() {
        assert_eq!(RgbColor::WHITE.scale(0.5), RgbColor::new(128, 128, 128));
        assert_eq!(RgbColor::RED.scale(4.0), RgbColor::RED);
        assert_eq!(RgbColor::GREEN.scale(0.0), RgbColor::BLACK);
    }
}
