use super::Rgb;

/// Channel order a strip expects on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorByteOrder {
    Rgb,
    Rbg,
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorByteOrder {
    /// Lay out a color in wire order
    pub const fn encode(self, color: Rgb) -> [u8; 3] {
        let Rgb { r, g, b } = color;
        match self {
            Self::Rgb => [r, g, b],
            Self::Rbg => [r, b, g],
            Self::Grb => [g, r, b],
            Self::Gbr => [g, b, r],
            Self::Brg => [b, r, g],
            Self::Bgr => [b, g, r],
        }
    }
}
