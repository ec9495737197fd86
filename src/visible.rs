//! The "currently detected" effect of a detection pass
//!
//! Detectors publish their raw match here so that primitives evaluated
//! later in the same frame (sound-length based timings, for example) can
//! look at it. Nested passes take a [`VisibleEffectGuard`] so whatever they
//! publish is rolled back when they return.

use core::ops::{Deref, DerefMut};

use embassy_time::Duration;

use crate::effect::BladeEffect;

/// Single slot holding the most recently matched effect, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisibleEffect {
    current: Option<BladeEffect>,
}

impl VisibleEffect {
    pub const fn new() -> Self {
        Self { current: None }
    }

    pub const fn get(&self) -> Option<BladeEffect> {
        self.current
    }

    pub fn set(&mut self, effect: Option<BladeEffect>) {
        self.current = effect;
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Sound length of the visible effect, zero when empty
    pub fn sound_length(&self) -> Duration {
        self.current
            .map_or(Duration::from_micros(0), |effect| effect.sound_length())
    }

    /// Save the current value, restoring it when the guard drops
    pub fn save(&mut self) -> VisibleEffectGuard<'_> {
        VisibleEffectGuard {
            saved: self.current,
            slot: self,
        }
    }
}

/// Restores the saved visible effect on drop.
#[derive(Debug)]
pub struct VisibleEffectGuard<'a> {
    slot: &'a mut VisibleEffect,
    saved: Option<BladeEffect>,
}

impl Deref for VisibleEffectGuard<'_> {
    type Target = VisibleEffect;

    fn deref(&self) -> &VisibleEffect {
        self.slot
    }
}

impl DerefMut for VisibleEffectGuard<'_> {
    fn deref_mut(&mut self) -> &mut VisibleEffect {
        self.slot
    }
}

impl Drop for VisibleEffectGuard<'_> {
    fn drop(&mut self) {
        self.slot.current = self.saved;
    }
}
