//! Style composition
//!
//! A [`Style`] is a stack of layers rendered bottom to top. Layers are stored
//! in the [`LayerSlot`] enum to avoid heap allocations; each variant
//! implements the [`Layer`] trait.

mod flash;
mod lockup;
mod solid;

use embassy_time::Instant;
pub use flash::{FlashArea, FlashConfig, FlashDuration, FlashLayer};
use heapless::Vec;
pub use lockup::{LockupConfig, LockupLayer, LockupVariant};
pub use solid::SolidLayer;

use crate::blade::{Blade, BladeStyle};
use crate::color::{BLACK, Color16};
use crate::feature::{HandledFeature, HandledFeatureSet, StyleGraphBuilder};
use crate::visible::VisibleEffect;

pub trait Layer {
    /// Sets if the layer may exceed the battery brightness limit
    ///
    /// Meant for short flashes, so it is disabled by default
    const OVERDRIVE: bool = false;

    /// Update layer state for this frame
    ///
    /// Detectors run here, in composition order.
    fn run(&mut self, blade: &dyn Blade, now: Instant, visible: &mut VisibleEffect);

    /// Color of LED `index`, `None` where the layer is transparent
    fn color(&self, index: usize, led_count: usize) -> Option<Color16>;

    fn activate(&mut self) {}

    /// Drop any per-frame state
    fn deactivate(&mut self) {}
}

/// Layer slot - enum containing all layer kinds
#[derive(Debug, Clone)]
pub enum LayerSlot {
    Solid(SolidLayer),
    Flash(FlashLayer),
    Lockup(LockupLayer),
}

/// Description of a layer, turned into a [`LayerSlot`] while building.
#[derive(Debug, Clone, Copy)]
pub enum LayerConfig {
    Solid(Color16),
    Flash(FlashConfig),
    Lockup(LockupConfig),
}

impl LayerConfig {
    pub fn build(&self, builder: &mut StyleGraphBuilder<'_>) -> LayerSlot {
        match self {
            Self::Solid(color) => LayerSlot::Solid(SolidLayer::new(*color)),
            Self::Flash(config) => LayerSlot::Flash(FlashLayer::new(config, builder)),
            Self::Lockup(config) => LayerSlot::Lockup(LockupLayer::new(config, builder)),
        }
    }
}

impl LayerSlot {
    /// Returns if the layer may bypass the brightness limit
    pub fn overdrive(&self) -> bool {
        match self {
            Self::Solid(_) => SolidLayer::OVERDRIVE,
            Self::Flash(_) => FlashLayer::OVERDRIVE,
            Self::Lockup(_) => LockupLayer::OVERDRIVE,
        }
    }

    pub fn run(&mut self, blade: &dyn Blade, now: Instant, visible: &mut VisibleEffect) {
        match self {
            Self::Solid(layer) => layer.run(blade, now, visible),
            Self::Flash(layer) => layer.run(blade, now, visible),
            Self::Lockup(layer) => layer.run(blade, now, visible),
        }
    }

    pub fn color(&self, index: usize, led_count: usize) -> Option<Color16> {
        match self {
            Self::Solid(layer) => layer.color(index, led_count),
            Self::Flash(layer) => layer.color(index, led_count),
            Self::Lockup(layer) => layer.color(index, led_count),
        }
    }

    pub fn activate(&mut self) {
        match self {
            Self::Solid(layer) => Layer::activate(layer),
            Self::Flash(layer) => Layer::activate(layer),
            Self::Lockup(layer) => Layer::activate(layer),
        }
    }

    pub fn deactivate(&mut self) {
        match self {
            Self::Solid(layer) => Layer::deactivate(layer),
            Self::Flash(layer) => Layer::deactivate(layer),
            Self::Lockup(layer) => Layer::deactivate(layer),
        }
    }
}

/// Error returned when a style cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleError {
    /// More layers were requested than the style can hold
    TooManyLayers { requested: usize, capacity: usize },
}

/// Stack of up to `LAYERS` layers attached to one blade
#[derive(Debug, Clone)]
pub struct Style<const LAYERS: usize> {
    layers: Vec<LayerSlot, LAYERS>,
    handled: HandledFeatureSet,
}

impl<const LAYERS: usize> Style<LAYERS> {
    /// Build a style inside a style graph build pass
    ///
    /// The style remembers the features its own layers declared.
    pub fn build(
        builder: &mut StyleGraphBuilder<'_>,
        layers: &[LayerConfig],
    ) -> Result<Self, StyleError> {
        if layers.len() > LAYERS {
            return Err(StyleError::TooManyLayers {
                requested: layers.len(),
                capacity: LAYERS,
            });
        }

        builder.begin_style();
        let mut slots = Vec::new();
        for config in layers {
            let slot = config.build(builder);
            // Capacity was checked above
            let _ = slots.push(slot);
        }

        Ok(Self {
            layers: slots,
            handled: builder.end_style(),
        })
    }

    pub const fn handled_features(&self) -> HandledFeatureSet {
        self.handled
    }

    pub fn layers(&self) -> &[LayerSlot] {
        &self.layers
    }

    pub fn activate(&mut self) {
        for layer in &mut self.layers {
            layer.activate();
        }
    }

    pub fn deactivate(&mut self) {
        for layer in &mut self.layers {
            layer.deactivate();
        }
    }

    /// Render one frame onto `blade`
    ///
    /// Every layer runs inside its own save scope of `visible`, so an
    /// effect published by one layer is gone by the time the next one runs.
    pub fn run(&mut self, blade: &mut dyn Blade, now: Instant, visible: &mut VisibleEffect) {
        for layer in &mut self.layers {
            let mut scope = visible.save();
            layer.run(&*blade, now, &mut scope);
        }

        let led_count = blade.led_count();
        for index in 0..led_count {
            let top = self.layers.iter().rev().find_map(|layer| {
                layer
                    .color(index, led_count)
                    .map(|color| (color, layer.overdrive()))
            });
            match top {
                Some((color, true)) => blade.set_overdrive(index, color),
                Some((color, false)) => blade.set(index, color),
                None => blade.set(index, BLACK),
            }
        }
    }
}

impl<const LAYERS: usize> BladeStyle for Style<LAYERS> {
    fn is_handled(&self, feature: HandledFeature) -> bool {
        self.handled.contains(feature)
    }
}
