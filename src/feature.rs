//! Handled-feature registry
//!
//! Style layers declare which effect categories they implement while the
//! style graph is built. The union of those declarations decides fallback
//! behavior at render time, e.g. whether an unhandled stab is shown as a
//! clash.
//!
//! A build pass is explicit: [`FeatureRegistry::reset`] clears the registry
//! and hands out a [`StyleGraphBuilder`], the only way to declare features
//! or construct detectors. [`StyleGraphBuilder::finish`] seals the registry
//! until the next reset.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::blade::BladeStyle;
use crate::effect::EffectKind;

/// Effect category a style layer can take responsibility for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum HandledFeature {
    Change = 1 << 0,
    ChangeTicked = 1 << 1,
    Stab = 1 << 2,
    Drag = 1 << 3,
    Melt = 1 << 4,
    LightningBlock = 1 << 5,
    InteractivePreon = 1 << 6,
    InteractiveBlast = 1 << 7,
}

impl HandledFeature {
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Feature implied by detecting `kind`
    ///
    /// Only kinds whose mere detection changes how other effects are
    /// handled map to a feature.
    pub const fn for_effect(kind: EffectKind) -> Option<Self> {
        match kind {
            EffectKind::Stab => Some(Self::Stab),
            EffectKind::InteractivePreon => Some(Self::InteractivePreon),
            EffectKind::InteractiveBlast => Some(Self::InteractiveBlast),
            _ => None,
        }
    }
}

/// Bitmask of handled features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandledFeatureSet(u8);

impl HandledFeatureSet {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, feature: HandledFeature) -> bool {
        self.0 & feature.bit() != 0
    }

    #[must_use]
    pub const fn with(self, feature: HandledFeature) -> Self {
        Self(self.0 | feature.bit())
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, feature: HandledFeature) {
        self.0 |= feature.bit();
    }
}

impl BladeStyle for HandledFeatureSet {
    fn is_handled(&self, feature: HandledFeature) -> bool {
        self.contains(feature)
    }
}

/// Registry of features declared by the current style graph.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    handled: HandledFeatureSet,
    sealed: bool,
}

impl FeatureRegistry {
    pub const fn new() -> Self {
        Self {
            handled: HandledFeatureSet::EMPTY,
            sealed: false,
        }
    }

    /// Clear the registry and start a new style graph build
    ///
    /// Must be called exactly once per build, before any layer is
    /// constructed.
    pub fn reset(&mut self) -> StyleGraphBuilder<'_> {
        self.handled = HandledFeatureSet::EMPTY;
        self.sealed = false;
        StyleGraphBuilder {
            registry: self,
            style: HandledFeatureSet::EMPTY,
        }
    }

    /// Union of features declared since the last reset
    pub const fn current(&self) -> HandledFeatureSet {
        self.handled
    }

    /// Whether the last build pass was finished
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }
}

impl BladeStyle for FeatureRegistry {
    fn is_handled(&self, feature: HandledFeature) -> bool {
        self.handled.contains(feature)
    }
}

/// One style graph build pass.
///
/// Besides the registry-wide union it tracks the features declared since
/// the last [`begin_style`](Self::begin_style), so each style instance can
/// answer for itself.
#[derive(Debug)]
pub struct StyleGraphBuilder<'r> {
    registry: &'r mut FeatureRegistry,
    style: HandledFeatureSet,
}

impl StyleGraphBuilder<'_> {
    /// Record that a layer being built implements `feature`
    pub fn declare(&mut self, feature: HandledFeature) {
        self.registry.handled.insert(feature);
        self.style.insert(feature);
    }

    /// Union of features declared in this pass so far
    pub const fn current(&self) -> HandledFeatureSet {
        self.registry.handled
    }

    /// Start collecting features for a new style instance
    pub fn begin_style(&mut self) {
        self.style = HandledFeatureSet::EMPTY;
    }

    /// Features declared since the matching `begin_style`
    pub fn end_style(&mut self) -> HandledFeatureSet {
        core::mem::take(&mut self.style)
    }

    /// Seal the registry and return the final union
    pub fn finish(self) -> HandledFeatureSet {
        self.registry.sealed = true;
        #[cfg(feature = "esp32-log")]
        println!(
            "[StyleGraphBuilder.finish] handled features {:#010b}",
            self.registry.handled.bits()
        );
        self.registry.handled
    }
}
