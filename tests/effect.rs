mod tests {
    use saber_blade_core::{
        BladeEffect, Duration, EffectKind, EffectLocation, EffectQueue, Instant,
        effect::{EFFECT_LIFETIME, MAX_SOUND_LENGTH},
    };

    fn effect(kind: EffectKind, millis: u64) -> BladeEffect {
        BladeEffect::new(kind, Instant::from_millis(millis))
    }

    #[test]
    fn test_effect_kind_raw_ids_round_trip() {
        for (index, kind) in EffectKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, index);
            assert_eq!(EffectKind::from_raw(*kind as u8), Some(*kind));
            assert_eq!(EffectKind::parse_from_str(kind.as_str()), Some(*kind));
        }
        assert_eq!(EffectKind::from_raw(200), None);
    }

    #[test]
    fn test_effect_kind_names() {
        assert_eq!(EffectKind::Clash.as_str(), "clash");
        assert_eq!(EffectKind::parse_from_str("stab"), Some(EffectKind::Stab));
        assert_eq!(
            EffectKind::parse_from_str("lightning_block_begin"),
            Some(EffectKind::LightningBlockBegin)
        );
        assert_eq!(EffectKind::parse_from_str("saber"), None);
    }

    #[test]
    fn test_location_from_fraction() {
        assert_eq!(EffectLocation::from_fraction(0.0), EffectLocation::Base);
        assert_eq!(EffectLocation::from_fraction(0.49), EffectLocation::Base);
        assert_eq!(EffectLocation::from_fraction(0.5), EffectLocation::Tip);
        assert_eq!(EffectLocation::from_fraction(1.0), EffectLocation::Tip);
    }

    #[test]
    fn test_sound_length() {
        let clash = effect(EffectKind::Clash, 0);
        assert_eq!(clash.sound_length(), Duration::from_micros(0));
        assert_eq!(
            clash.with_sound(1.25, 0).sound_length(),
            Duration::from_millis(1250)
        );
        assert_eq!(
            clash.with_sound(-1.0, 0).sound_length(),
            Duration::from_micros(0)
        );
        assert_eq!(
            clash.with_sound(f32::NAN, 0).sound_length(),
            Duration::from_micros(0)
        );
    }

    #[test]
    fn test_sound_length_is_capped() {
        let blast = effect(EffectKind::Blast, 0);
        assert_eq!(
            blast.with_sound(f32::INFINITY, 0).sound_length(),
            MAX_SOUND_LENGTH
        );
        assert_eq!(blast.with_sound(1.0e12, 0).sound_length(), MAX_SOUND_LENGTH);
        assert_eq!(
            blast.with_sound(f32::NEG_INFINITY, 0).sound_length(),
            Duration::from_micros(0)
        );
    }

    #[test]
    fn test_queue_keeps_newest_first() {
        let mut queue: EffectQueue<3> = EffectQueue::new();
        queue.push(effect(EffectKind::Clash, 1));
        queue.push(effect(EffectKind::Blast, 2));
        queue.push(effect(EffectKind::Stab, 3));
        queue.push(effect(EffectKind::Force, 4));

        let kinds: Vec<_> = queue.as_slice().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, [EffectKind::Force, EffectKind::Stab, EffectKind::Blast]);
    }

    #[test]
    fn test_queue_expires_old_effects() {
        let mut queue: EffectQueue = EffectQueue::new();
        queue.push(effect(EffectKind::Clash, 0));
        queue.push(effect(EffectKind::Blast, 5_000));

        queue.expire(Instant::from_millis(0) + EFFECT_LIFETIME);
        assert_eq!(queue.len(), 2);

        queue.expire(Instant::from_millis(8_000));
        assert_eq!(queue.as_slice(), &[effect(EffectKind::Blast, 5_000)]);

        queue.expire(Instant::from_millis(20_000));
        assert!(queue.is_empty());
    }
}
