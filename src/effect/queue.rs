use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::BladeEffect;

/// Default number of effects a blade remembers.
pub const MAX_EFFECTS: usize = 4;

/// Effects older than this are dropped from the queue.
pub const EFFECT_LIFETIME: Duration = Duration::from_secs(7);

/// Bounded queue of recent effects, newest first.
///
/// The queue belongs to one blade. Its contents are rewritten every frame,
/// so styles only ever see it through a borrow for the current frame.
#[derive(Debug, Clone, Default)]
pub struct EffectQueue<const N: usize = MAX_EFFECTS> {
    effects: Vec<BladeEffect, N>,
}

impl<const N: usize> EffectQueue<N> {
    pub const fn new() -> Self {
        Self { effects: Vec::new() }
    }

    /// Add an effect at the front, dropping the oldest one if full
    pub fn push(&mut self, effect: BladeEffect) {
        if N == 0 {
            return;
        }
        if self.effects.is_full() {
            self.effects.pop();
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[EffectQueue.push] {} at {}us",
            effect.kind.as_str(),
            effect.start_time.as_micros()
        );
        // Cannot fail, a slot was freed above
        let _ = self.effects.push(effect);
        self.effects.rotate_right(1);
    }

    /// Drop effects that started more than [`EFFECT_LIFETIME`] ago
    pub fn expire(&mut self, now: Instant) {
        // Newest first, so expired entries sit at the tail
        while let Some(last) = self.effects.last() {
            if last.age(now) <= EFFECT_LIFETIME {
                break;
            }
            self.effects.pop();
        }
    }

    pub fn as_slice(&self) -> &[BladeEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
