//! Blade abstraction
//!
//! A blade is one addressable LED strip together with the effects sensed
//! for it and its power state. Detectors only read from it; styles write
//! colors into it.

mod led;

pub use led::{BladeConfig, FULL_BRIGHTNESS, LedBlade};

use crate::color::{BLACK, Color16, ColorByteOrder};
use crate::effect::BladeEffect;
use crate::feature::HandledFeature;

/// Capabilities of a style attached to a blade.
pub trait BladeStyle {
    /// Whether this style instance implements `feature`
    fn is_handled(&self, feature: HandledFeature) -> bool;
}

/// One addressable LED strip.
pub trait Blade {
    /// Number of addressable LEDs
    fn led_count(&self) -> usize;

    fn byte_order(&self) -> ColorByteOrder;

    /// Logical on state, false while fading out after retraction
    fn is_on(&self) -> bool;

    /// Whether the strip has voltage applied
    fn is_powered(&self) -> bool;

    /// Effects of the current frame, newest first
    fn effects(&self) -> &[BladeEffect];

    /// Write one LED
    ///
    /// `index` must be below [`led_count`](Self::led_count).
    fn set(&mut self, index: usize, color: Color16);

    /// Write one LED bypassing the battery brightness limit
    ///
    /// Only meant for short flashes.
    fn set_overdrive(&mut self, index: usize, color: Color16) {
        self.set(index, color);
    }

    fn clear(&mut self) {
        for index in 0..self.led_count() {
            self.set(index, BLACK);
        }
    }

    /// Allow the blade to cut power
    ///
    /// Called once `is_on` has been false for a while.
    fn allow_disable(&mut self);

    fn activate(&mut self);

    fn deactivate(&mut self);

    /// Whether this is the main effect source of the device
    fn is_primary(&self) -> bool;

    fn current_style(&self) -> Option<&dyn BladeStyle>;
}
