mod tests {
    use saber_blade_core::{
        Blade, BladeConfig, BladeEffect, Color16, ColorByteOrder, EffectKind, FeatureRegistry,
        HandledFeature, Instant, LayerConfig, LedBlade, Rgb, Style, VisibleEffect,
        blade::FULL_BRIGHTNESS,
        color::BLACK,
    };

    const RED: Color16 = Color16::new(u16::MAX, 0, 0);
    const BLUE: Color16 = Color16::new(0, 0, u16::MAX);

    fn blade(led_count: usize) -> LedBlade<8> {
        let mut blade = LedBlade::new(&BladeConfig {
            led_count,
            ..BladeConfig::default()
        });
        blade.activate();
        blade
    }

    fn solid(registry: &mut FeatureRegistry, color: Color16) -> Style<4> {
        let mut builder = registry.reset();
        let style = Style::build(&mut builder, &[LayerConfig::Solid(color)]);
        builder.finish();
        style.unwrap()
    }

    #[test]
    fn test_led_count_is_clamped_to_capacity() {
        assert_eq!(blade(5).led_count(), 5);
        assert_eq!(blade(20).led_count(), 8);
    }

    #[test]
    fn test_set_applies_brightness_ceiling() {
        let mut blade = blade(3);
        blade.set_brightness_ceiling(FULL_BRIGHTNESS / 2);

        blade.set(0, RED);
        blade.set_overdrive(1, RED);

        assert_eq!(blade.leds()[0], Color16::new(32767, 0, 0));
        assert_eq!(blade.leds()[1], RED);
        assert_eq!(blade.leds()[2], BLACK);
    }

    #[test]
    fn test_clear_blanks_every_led() {
        let mut blade = blade(4);
        for index in 0..4 {
            blade.set(index, BLUE);
        }
        blade.clear();
        assert!(blade.leds().iter().all(|led| *led == BLACK));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range_is_caught() {
        let mut blade = blade(4);
        blade.set(4, RED);
    }

    #[test]
    fn test_power_states() {
        let mut blade = blade(2);
        assert!(!blade.is_on());
        assert!(!blade.is_powered());

        blade.turn_on();
        assert!(blade.is_on());
        assert!(blade.is_powered());

        blade.allow_disable();
        assert!(blade.is_powered());

        blade.turn_off(Instant::from_millis(100));
        assert!(!blade.is_on());
        assert!(blade.is_powered());
        assert_eq!(blade.off_since(), Some(Instant::from_millis(100)));

        blade.allow_disable();
        assert!(!blade.is_powered());
    }

    #[test]
    fn test_render_runs_style_only_while_on() {
        let mut registry = FeatureRegistry::new();
        let mut blade = blade(4);
        let mut visible = VisibleEffect::new();
        blade.set_style(solid(&mut registry, RED));

        assert_eq!(blade.render(Instant::from_millis(0), &mut visible), &[Rgb::default(); 4]);

        blade.turn_on();
        let frame = blade.render(Instant::from_millis(10), &mut visible);
        assert_eq!(frame, &[Rgb::new(255, 0, 0); 4]);

        blade.turn_off(Instant::from_millis(20));
        let frame = blade.render(Instant::from_millis(30), &mut visible);
        assert_eq!(frame, &[Rgb::default(); 4]);
    }

    #[test]
    fn test_set_style_replaces_previous_style() {
        let mut registry = FeatureRegistry::new();
        let mut blade = blade(2);
        assert!(blade.current_style().is_none());

        assert!(blade.set_style(solid(&mut registry, RED)).is_none());
        let previous = blade.set_style(solid(&mut registry, BLUE));
        assert!(previous.is_some());

        blade.turn_on();
        let frame = blade.render(Instant::from_millis(0), &mut VisibleEffect::new());
        assert_eq!(frame, &[Rgb::new(0, 0, 255); 2]);

        assert!(blade.unset_style().is_some());
        assert!(blade.current_style().is_none());
        assert!(blade.unset_style().is_none());
    }

    #[test]
    fn test_current_style_reports_handled_features() {
        let mut registry = FeatureRegistry::new();
        let mut builder = registry.reset();
        let style: Style<4> = Style::build(
            &mut builder,
            &[LayerConfig::Flash(saber_blade_core::style::FlashConfig {
                kind: EffectKind::Stab,
                color: RED,
                duration: saber_blade_core::style::FlashDuration::Fixed(
                    saber_blade_core::Duration::from_millis(100),
                ),
                area: saber_blade_core::style::FlashArea::Whole,
            })],
        )
        .unwrap();
        builder.finish();

        let mut blade = blade(2);
        blade.set_style(style);
        let current = blade.current_style().unwrap();
        assert!(current.is_handled(HandledFeature::Stab));
        assert!(!current.is_handled(HandledFeature::Drag));
    }

    #[test]
    fn test_inactive_blade_ignores_effects() {
        let mut blade: LedBlade<4> = LedBlade::new(&BladeConfig::default());
        blade.push_effect(BladeEffect::new(EffectKind::Clash, Instant::from_millis(1)));
        assert!(blade.effects().is_empty());

        blade.activate();
        blade.push_effect(BladeEffect::new(EffectKind::Clash, Instant::from_millis(1)));
        assert_eq!(blade.effects().len(), 1);

        blade.deactivate();
        assert!(blade.effects().is_empty());
    }

    #[test]
    fn test_render_expires_old_effects() {
        let mut blade = blade(1);
        blade.push_effect(BladeEffect::new(EffectKind::Blast, Instant::from_millis(0)));
        blade.render(Instant::from_millis(6_000), &mut VisibleEffect::new());
        assert_eq!(blade.effects().len(), 1);
        blade.render(Instant::from_millis(8_000), &mut VisibleEffect::new());
        assert!(blade.effects().is_empty());
    }

    #[test]
    fn test_byte_order_encoding() {
        let color = Rgb::new(1, 2, 3);
        assert_eq!(ColorByteOrder::Rgb.encode(color), [1, 2, 3]);
        assert_eq!(ColorByteOrder::Grb.encode(color), [2, 1, 3]);
        assert_eq!(ColorByteOrder::Bgr.encode(color), [3, 2, 1]);
        assert_eq!(ColorByteOrder::default(), ColorByteOrder::Grb);
    }
}
