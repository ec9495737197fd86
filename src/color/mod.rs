mod byte_order;

pub use byte_order::ColorByteOrder;
use rgb::RGB16;
use smart_leds::RGB8;

/// 16-bit per channel color written to blades
pub type Color16 = RGB16;

/// 8-bit per channel color handed to output drivers
pub type Rgb = RGB8;

pub const BLACK: Color16 = Color16::new(0, 0, 0);

/// Scale a 16-bit value by a factor (0-65535 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale16(value: u16, scale: u16) -> u16 {
    ((value as u32 * (1 + scale as u32)) >> 16) as u16
}

/// Scale every channel of a color
#[inline]
pub const fn scale_color16(color: Color16, scale: u16) -> Color16 {
    Color16::new(
        scale16(color.r, scale),
        scale16(color.g, scale),
        scale16(color.b, scale),
    )
}

/// Drop the low byte of every channel
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn to_rgb8(color: Color16) -> Rgb {
    Rgb {
        r: (color.r >> 8) as u8,
        g: (color.g >> 8) as u8,
        b: (color.b >> 8) as u8,
    }
}

/// Widen an 8-bit color so that 0xFF maps to 0xFFFF
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn from_rgb8(color: Rgb) -> Color16 {
    Color16::new(
        color.r as u16 * 257,
        color.g as u16 * 257,
        color.b as u16 * 257,
    )
}
