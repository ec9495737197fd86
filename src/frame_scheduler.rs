//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::blade::{Blade, LedBlade};
use crate::channel::EffectReceiver;
use crate::visible::VisibleEffect;

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// How long a blade stays powered after turning off.
///
/// Leaves styles time to fade out before the strip loses voltage.
pub const DEFAULT_DISABLE_DELAY: Duration = Duration::from_millis(500);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Timing configuration for a [`FrameScheduler`]
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub frame_duration: Duration,
    pub disable_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            frame_duration: DEFAULT_FRAME_DURATION,
            disable_delay: DEFAULT_DISABLE_DELAY,
        }
    }
}

/// Drives every blade of the device once per frame.
///
/// Each tick:
/// - Moves sensed effects from the channel into every blade
/// - Renders the blades in order and hands the frames to the output driver
/// - Lets blades cut power once they have been off for the disable delay
///
/// # Usage
///
/// ```ignore
/// static EFFECTS: EffectChannel<8> = EffectChannel::new();
/// let mut scheduler = FrameScheduler::new(driver, EFFECTS.receiver());
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()), &mut blades);
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const CHANNEL_SIZE: usize> {
    output: O,
    effects: EffectReceiver<'a, CHANNEL_SIZE>,
    /// Outermost scope of the visible-effect slot. Every blade render
    /// saves and restores it, so between blades it always reads empty.
    visible: VisibleEffect,
    next_frame: Instant,
    frame_duration: Duration,
    disable_delay: Duration,
}

impl<'a, O: OutputDriver, const CHANNEL_SIZE: usize> FrameScheduler<'a, O, CHANNEL_SIZE> {
    /// Create a new frame scheduler with default timings.
    pub fn new(driver: O, effects: EffectReceiver<'a, CHANNEL_SIZE>) -> Self {
        Self::with_config(driver, effects, &SchedulerConfig::default())
    }

    pub fn with_config(
        driver: O,
        effects: EffectReceiver<'a, CHANNEL_SIZE>,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            output: driver,
            effects,
            visible: VisibleEffect::new(),
            next_frame: Instant::from_millis(0),
            frame_duration: config.frame_duration,
            disable_delay: config.disable_delay,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// Blades are rendered in slice order. The caller is responsible for
    /// waiting until `next_deadline` before calling `tick` again.
    pub fn tick<const MAX_LEDS: usize, const EFFECTS: usize, const LAYERS: usize>(
        &mut self,
        now: Instant,
        blades: &mut [LedBlade<MAX_LEDS, EFFECTS, LAYERS>],
    ) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        for effect in self.effects.drain() {
            for blade in blades.iter_mut() {
                blade.push_effect(effect);
            }
        }

        for (index, blade) in blades.iter_mut().enumerate() {
            let byte_order = blade.byte_order();
            let frame = blade.render(now, &mut self.visible);
            self.output.write(index, byte_order, frame);
            self.release_power(blade, now);
        }

        self.next_frame += self.frame_duration;

        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Visible-effect slot as seen between blade renders
    pub const fn visible(&self) -> &VisibleEffect {
        &self.visible
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn release_power<const MAX_LEDS: usize, const EFFECTS: usize, const LAYERS: usize>(
        &self,
        blade: &mut LedBlade<MAX_LEDS, EFFECTS, LAYERS>,
        now: Instant,
    ) {
        let Some(off_since) = blade.off_since() else {
            return;
        };
        if !blade.is_powered() {
            return;
        }
        let off_for = now
            .checked_duration_since(off_since)
            .unwrap_or(Duration::from_millis(0));
        if off_for >= self.disable_delay {
            #[cfg(feature = "esp32-log")]
            println!("[FrameScheduler.tick] blade off for {}ms", off_for.as_millis());
            blade.allow_disable();
        }
    }
}
