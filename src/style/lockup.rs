//! Sustained effects bounded by a begin and an end effect

use embassy_time::Instant;

use super::Layer;
use crate::{
    blade::Blade,
    color::Color16,
    detector::SpanDetector,
    effect::EffectKind,
    feature::{HandledFeature, StyleGraphBuilder},
    visible::VisibleEffect,
};

/// Kind of sustained effect a [`LockupLayer`] shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockupVariant {
    Lockup,
    Drag,
    Melt,
    LightningBlock,
}

impl LockupVariant {
    /// Effects opening and closing the span
    pub const fn kinds(self) -> (EffectKind, EffectKind) {
        match self {
            Self::Lockup => (EffectKind::LockupBegin, EffectKind::LockupEnd),
            Self::Drag => (EffectKind::DragBegin, EffectKind::DragEnd),
            Self::Melt => (EffectKind::MeltBegin, EffectKind::MeltEnd),
            Self::LightningBlock => (
                EffectKind::LightningBlockBegin,
                EffectKind::LightningBlockEnd,
            ),
        }
    }

    pub const fn feature(self) -> Option<HandledFeature> {
        match self {
            Self::Lockup => None,
            Self::Drag => Some(HandledFeature::Drag),
            Self::Melt => Some(HandledFeature::Melt),
            Self::LightningBlock => Some(HandledFeature::LightningBlock),
        }
    }

    /// Drag and melt happen at the tip, the rest covers the blade
    const fn at_tip(self) -> bool {
        matches!(self, Self::Drag | Self::Melt)
    }
}

/// Configuration for a [`LockupLayer`]
#[derive(Debug, Clone, Copy)]
pub struct LockupConfig {
    pub variant: LockupVariant,
    pub color: Color16,
}

#[derive(Debug, Clone)]
pub struct LockupLayer {
    span: SpanDetector,
    variant: LockupVariant,
    color: Color16,
    active: bool,
}

impl LockupLayer {
    pub fn new(config: &LockupConfig, builder: &mut StyleGraphBuilder<'_>) -> Self {
        let (begin, end) = config.variant.kinds();
        if let Some(feature) = config.variant.feature() {
            builder.declare(feature);
        }
        Self {
            span: SpanDetector::new(begin, end, builder),
            variant: config.variant,
            color: config.color,
            active: false,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl Layer for LockupLayer {
    fn run(&mut self, blade: &dyn Blade, _now: Instant, _visible: &mut VisibleEffect) {
        self.active = self.span.update(blade);
    }

    fn color(&self, index: usize, led_count: usize) -> Option<Color16> {
        if !self.active {
            return None;
        }
        if self.variant.at_tip() && index < led_count - led_count / 4 {
            return None;
        }
        Some(self.color)
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}
