//! Blade backed by an in-memory frame buffer

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Blade, BladeStyle};
use crate::color::{BLACK, Color16, ColorByteOrder, Rgb, scale_color16, to_rgb8};
use crate::effect::{BladeEffect, EffectQueue, MAX_EFFECTS};
use crate::feature::HandledFeatureSet;
use crate::style::Style;
use crate::visible::VisibleEffect;

/// Brightness ceiling that leaves colors untouched.
pub const FULL_BRIGHTNESS: u16 = u16::MAX;

/// Configuration for an [`LedBlade`]
#[derive(Debug, Clone, Copy)]
pub struct BladeConfig {
    /// Number of LEDs, clamped to the blade's capacity
    pub led_count: usize,
    pub byte_order: ColorByteOrder,
    /// Main effect source of the device
    pub primary: bool,
    /// Battery limited brightness applied by `set` (0-65535 = 0.0-1.0)
    pub brightness_ceiling: u16,
}

impl Default for BladeConfig {
    fn default() -> Self {
        Self {
            led_count: 0,
            byte_order: ColorByteOrder::default(),
            primary: true,
            brightness_ceiling: FULL_BRIGHTNESS,
        }
    }
}

/// Everything a blade owns except its style
#[derive(Debug)]
struct Strip<const MAX_LEDS: usize, const EFFECTS: usize> {
    leds: [Color16; MAX_LEDS],
    led_count: usize,
    byte_order: ColorByteOrder,
    primary: bool,
    brightness_ceiling: u16,
    on: bool,
    powered: bool,
    active: bool,
    off_since: Option<Instant>,
    effects: EffectQueue<EFFECTS>,
}

impl<const MAX_LEDS: usize, const EFFECTS: usize> Strip<MAX_LEDS, EFFECTS> {
    fn write(&mut self, index: usize, color: Color16) {
        debug_assert!(
            index < self.led_count,
            "LED index {} out of range for {} LEDs",
            index,
            self.led_count
        );
        if index < self.led_count {
            self.leds[index] = color;
        }
    }

    fn set(&mut self, index: usize, color: Color16) {
        self.write(index, scale_color16(color, self.brightness_ceiling));
    }

    fn allow_disable(&mut self) {
        if self.on || !self.powered {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!("[LedBlade.allow_disable] cutting power");
        self.powered = false;
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.effects.clear();
        self.leds[..self.led_count].fill(BLACK);
    }
}

/// Blade as seen by its own style while rendering
///
/// Answers `current_style` with the running style's handled features.
pub(crate) struct StyledStrip<'a, const MAX_LEDS: usize, const EFFECTS: usize> {
    strip: &'a mut Strip<MAX_LEDS, EFFECTS>,
    style: HandledFeatureSet,
}

impl<const MAX_LEDS: usize, const EFFECTS: usize> Blade for StyledStrip<'_, MAX_LEDS, EFFECTS> {
    fn led_count(&self) -> usize {
        self.strip.led_count
    }

    fn byte_order(&self) -> ColorByteOrder {
        self.strip.byte_order
    }

    fn is_on(&self) -> bool {
        self.strip.on
    }

    fn is_powered(&self) -> bool {
        self.strip.powered
    }

    fn effects(&self) -> &[BladeEffect] {
        self.strip.effects.as_slice()
    }

    fn set(&mut self, index: usize, color: Color16) {
        self.strip.set(index, color);
    }

    fn set_overdrive(&mut self, index: usize, color: Color16) {
        self.strip.write(index, color);
    }

    fn allow_disable(&mut self) {
        self.strip.allow_disable();
    }

    fn activate(&mut self) {
        self.strip.activate();
    }

    fn deactivate(&mut self) {
        self.strip.deactivate();
    }

    fn is_primary(&self) -> bool {
        self.strip.primary
    }

    fn current_style(&self) -> Option<&dyn BladeStyle> {
        Some(&self.style)
    }
}

/// LED strip blade with a fixed capacity
///
/// * `MAX_LEDS` - frame buffer capacity
/// * `EFFECTS` - effect queue depth
/// * `LAYERS` - maximum layers of the attached style
pub struct LedBlade<const MAX_LEDS: usize, const EFFECTS: usize = MAX_EFFECTS, const LAYERS: usize = 4>
{
    strip: Strip<MAX_LEDS, EFFECTS>,
    style: Option<Style<LAYERS>>,
    frame: [Rgb; MAX_LEDS],
}

impl<const MAX_LEDS: usize, const EFFECTS: usize, const LAYERS: usize>
    LedBlade<MAX_LEDS, EFFECTS, LAYERS>
{
    /// Create an inactive, unpowered blade without a style
    pub fn new(config: &BladeConfig) -> Self {
        Self {
            strip: Strip {
                leds: [BLACK; MAX_LEDS],
                led_count: config.led_count.min(MAX_LEDS),
                byte_order: config.byte_order,
                primary: config.primary,
                brightness_ceiling: config.brightness_ceiling,
                on: false,
                powered: false,
                active: false,
                off_since: None,
                effects: EffectQueue::new(),
            },
            style: None,
            frame: [Rgb::default(); MAX_LEDS],
        }
    }

    /// Ignite: power the strip and mark it on
    pub fn turn_on(&mut self) {
        self.strip.on = true;
        self.strip.powered = true;
        self.strip.off_since = None;
    }

    /// Retract: mark the blade off, power stays until `allow_disable`
    pub fn turn_off(&mut self, now: Instant) {
        if self.strip.on {
            self.strip.on = false;
            self.strip.off_since = Some(now);
        }
    }

    /// When the blade was last turned off, if it is off
    pub const fn off_since(&self) -> Option<Instant> {
        self.strip.off_since
    }

    pub const fn is_active(&self) -> bool {
        self.strip.active
    }

    pub fn set_brightness_ceiling(&mut self, ceiling: u16) {
        self.strip.brightness_ceiling = ceiling;
    }

    /// Queue an effect sensed for this blade
    ///
    /// Inactive blades ignore effects.
    pub fn push_effect(&mut self, effect: BladeEffect) {
        if self.strip.active {
            self.strip.effects.push(effect);
        }
    }

    /// Attach a style, detaching the previous one first
    ///
    /// Returns the detached style.
    pub fn set_style(&mut self, mut style: Style<LAYERS>) -> Option<Style<LAYERS>> {
        let previous = self.unset_style();
        #[cfg(feature = "esp32-log")]
        println!(
            "[LedBlade.set_style] attaching style, handled {:#010b}",
            style.handled_features().bits()
        );
        style.activate();
        self.style = Some(style);
        previous
    }

    /// Detach and return the current style
    pub fn unset_style(&mut self) -> Option<Style<LAYERS>> {
        let mut style = self.style.take()?;
        #[cfg(feature = "esp32-log")]
        println!("[LedBlade.unset_style] detaching style");
        style.deactivate();
        Some(style)
    }

    pub const fn style(&self) -> Option<&Style<LAYERS>> {
        self.style.as_ref()
    }

    /// Current 16-bit frame buffer
    pub fn leds(&self) -> &[Color16] {
        &self.strip.leds[..self.strip.led_count]
    }

    /// Render one frame
    ///
    /// Expires old effects, runs the style when the blade is active,
    /// powered and on, and returns the 8-bit frame.
    pub fn render(&mut self, now: Instant, visible: &mut VisibleEffect) -> &[Rgb] {
        self.strip.effects.expire(now);

        let strip = &mut self.strip;
        let lit = strip.active && strip.powered && strip.on;
        match &mut self.style {
            Some(style) if lit => {
                let handled = style.handled_features();
                let mut blade = StyledStrip { strip, style: handled };
                let mut scope = visible.save();
                style.run(&mut blade, now, &mut scope);
            }
            _ => strip.leds[..strip.led_count].fill(BLACK),
        }

        let count = self.strip.led_count;
        for (out, led) in self.frame[..count].iter_mut().zip(&self.strip.leds[..count]) {
            *out = to_rgb8(*led);
        }
        &self.frame[..count]
    }
}

impl<const MAX_LEDS: usize, const EFFECTS: usize, const LAYERS: usize> Blade
    for LedBlade<MAX_LEDS, EFFECTS, LAYERS>
{
    fn led_count(&self) -> usize {
        self.strip.led_count
    }

    fn byte_order(&self) -> ColorByteOrder {
        self.strip.byte_order
    }

    fn is_on(&self) -> bool {
        self.strip.on
    }

    fn is_powered(&self) -> bool {
        self.strip.powered
    }

    fn effects(&self) -> &[BladeEffect] {
        self.strip.effects.as_slice()
    }

    fn set(&mut self, index: usize, color: Color16) {
        self.strip.set(index, color);
    }

    fn set_overdrive(&mut self, index: usize, color: Color16) {
        self.strip.write(index, color);
    }

    fn allow_disable(&mut self) {
        self.strip.allow_disable();
    }

    fn activate(&mut self) {
        self.strip.activate();
    }

    fn deactivate(&mut self) {
        self.strip.deactivate();
    }

    fn is_primary(&self) -> bool {
        self.strip.primary
    }

    fn current_style(&self) -> Option<&dyn BladeStyle> {
        self.style.as_ref().map(|style| style as &dyn BladeStyle)
    }
}
