mod tests {
    use saber_blade_core::color::{
        BLACK, Color16, Rgb, from_rgb8, scale16, scale_color16, to_rgb8,
    };

    const ORANGE8: Rgb = Rgb {
        r: 255,
        g: 128,
        b: 0,
    };

    #[test]
    fn test_scale16() {
        assert_eq!(scale16(u16::MAX, u16::MAX), u16::MAX);
        assert_eq!(scale16(0x8000, 0x8000), 0x4000);
        assert_eq!(scale16(u16::MAX, 0), 0);
        assert_eq!(scale16(0, u16::MAX), 0);
    }

    #[test]
    fn test_from_rgb8_widens_full_range() {
        assert_eq!(from_rgb8(ORANGE8), Color16::new(u16::MAX, 0x8080, 0));
        assert_eq!(from_rgb8(Rgb { r: 0, g: 0, b: 0 }), BLACK);
        assert_eq!(to_rgb8(from_rgb8(ORANGE8)), ORANGE8);
    }

    #[test]
    fn test_scale_color16() {
        let orange = from_rgb8(ORANGE8);
        assert_eq!(scale_color16(orange, u16::MAX), orange);
        assert_eq!(scale_color16(orange, 0), BLACK);
        assert_eq!(
            to_rgb8(scale_color16(orange, 0x8000)),
            Rgb {
                r: 128,
                g: 64,
                b: 0
            }
        );
    }
}
