//! One-shot flash on a detected effect
//!
//! Lights the blade for a while each time a new occurrence of the
//! configured effect is detected. The flash can last for a fixed time or
//! for as long as the effect's sound plays.

use embassy_time::{Duration, Instant};

use super::Layer;
use crate::{
    blade::Blade,
    color::Color16,
    detector::OneshotDetector,
    effect::{EffectKind, EffectLocation},
    feature::StyleGraphBuilder,
    visible::VisibleEffect,
};

/// How long a flash lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashDuration {
    Fixed(Duration),
    /// Length of the detected effect's sound, `fallback` when it has none
    SoundLength { fallback: Duration },
}

/// Which LEDs a flash covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlashArea {
    #[default]
    Whole,
    /// The half of the blade the effect is anchored to
    Anchored,
}

/// Configuration for a [`FlashLayer`]
#[derive(Debug, Clone, Copy)]
pub struct FlashConfig {
    pub kind: EffectKind,
    pub color: Color16,
    pub duration: FlashDuration,
    pub area: FlashArea,
}

#[derive(Debug, Clone)]
pub struct FlashLayer {
    detector: OneshotDetector,
    color: Color16,
    duration: FlashDuration,
    area: FlashArea,
    /// End of the running flash
    until: Option<Instant>,
    location: EffectLocation,
}

impl FlashLayer {
    pub fn new(config: &FlashConfig, builder: &mut StyleGraphBuilder<'_>) -> Self {
        Self {
            detector: OneshotDetector::new(config.kind, builder),
            color: config.color,
            duration: config.duration,
            area: config.area,
            until: None,
            location: EffectLocation::Base,
        }
    }

    pub const fn is_flashing(&self) -> bool {
        self.until.is_some()
    }

    pub const fn detector(&self) -> &OneshotDetector {
        &self.detector
    }
}

impl Layer for FlashLayer {
    const OVERDRIVE: bool = true;

    fn run(&mut self, blade: &dyn Blade, now: Instant, visible: &mut VisibleEffect) {
        if let Some(effect) = self.detector.detect_scoped(blade, visible) {
            let length = match self.duration {
                FlashDuration::Fixed(length) => length,
                FlashDuration::SoundLength { fallback } => {
                    let length = visible.sound_length();
                    if length.as_micros() == 0 { fallback } else { length }
                }
            };
            self.location = effect.location;
            self.until = Some(
                effect
                    .start_time
                    .checked_add(length)
                    .unwrap_or(Instant::MAX),
            );
        }

        if self.until.is_some_and(|until| now >= until) {
            self.until = None;
        }
    }

    fn color(&self, index: usize, led_count: usize) -> Option<Color16> {
        if self.until.is_none() {
            return None;
        }
        let half = led_count / 2;
        let covered = match (self.area, self.location) {
            (FlashArea::Whole, _) => true,
            (FlashArea::Anchored, EffectLocation::Base) => index < half,
            (FlashArea::Anchored, EffectLocation::Tip) => index >= half,
        };
        covered.then_some(self.color)
    }

    fn deactivate(&mut self) {
        self.until = None;
    }
}
