//! One-shot effect detection
//!
//! A [`OneshotDetector`] scans a blade's effect queue once per frame and
//! reports each occurrence of its kind at most once, keyed by the
//! occurrence's start time.

use embassy_time::Instant;

use crate::blade::Blade;
use crate::effect::{BladeEffect, EffectKind};
use crate::feature::{HandledFeature, StyleGraphBuilder};
use crate::visible::VisibleEffect;

/// Detects new occurrences of one effect kind on a blade.
///
/// One instance per layer and kind. The detector remembers the start time
/// of the last occurrence it reported and never reports it again.
#[derive(Debug, Clone)]
pub struct OneshotDetector {
    kind: EffectKind,
    last_detected: Option<Instant>,
}

impl OneshotDetector {
    /// Create a detector while building a style graph
    ///
    /// Detecting stab, interactive preon or interactive blast declares the
    /// matching handled feature.
    pub fn new(kind: EffectKind, builder: &mut StyleGraphBuilder<'_>) -> Self {
        if let Some(feature) = HandledFeature::for_effect(kind) {
            builder.declare(feature);
        }
        Self {
            kind,
            last_detected: None,
        }
    }

    pub const fn kind(&self) -> EffectKind {
        self.kind
    }

    /// First effect in the queue matching this detector
    ///
    /// A clash detector on the primary blade also matches stabs when the
    /// blade's style does not handle stabs itself.
    pub fn find<'b, B: Blade + ?Sized>(&self, blade: &'b B) -> Option<&'b BladeEffect> {
        let effects = blade.effects();
        let match_stab = self.kind == EffectKind::Clash
            && !blade
                .current_style()
                .is_some_and(|style| style.is_handled(HandledFeature::Stab))
            && blade.is_primary();

        effects.iter().find(|effect| {
            effect.kind == self.kind || (match_stab && effect.kind == EffectKind::Stab)
        })
    }

    /// Report the matching effect if it was not reported before
    pub fn detect<'b, B: Blade + ?Sized>(&mut self, blade: &'b B) -> Option<&'b BladeEffect> {
        let effect = self.find(blade)?;
        self.claim(effect)
    }

    /// Like [`detect`](Self::detect), but also publishes the raw match
    ///
    /// `visible` is updated with whatever `find` returned, including
    /// occurrences that were already reported.
    pub fn detect_scoped<'b, B: Blade + ?Sized>(
        &mut self,
        blade: &'b B,
        visible: &mut VisibleEffect,
    ) -> Option<&'b BladeEffect> {
        let effect = self.find(blade);
        visible.set(effect.copied());
        self.claim(effect?)
    }

    /// Start time of the last reported occurrence
    pub const fn last_detected_time(&self) -> Option<Instant> {
        self.last_detected
    }

    fn claim<'b>(&mut self, effect: &'b BladeEffect) -> Option<&'b BladeEffect> {
        if self.last_detected == Some(effect.start_time) {
            return None;
        }
        self.last_detected = Some(effect.start_time);
        Some(effect)
    }
}

/// Tracks a begin/end pair of effects, such as lockup begin and end.
#[derive(Debug, Clone)]
pub struct SpanDetector {
    begin: OneshotDetector,
    end: OneshotDetector,
}

impl SpanDetector {
    pub fn new(begin: EffectKind, end: EffectKind, builder: &mut StyleGraphBuilder<'_>) -> Self {
        Self {
            begin: OneshotDetector::new(begin, builder),
            end: OneshotDetector::new(end, builder),
        }
    }

    /// Run both detectors and report whether the span is open
    ///
    /// The span is open when the last begin is newer than the last end.
    pub fn update<B: Blade + ?Sized>(&mut self, blade: &B) -> bool {
        self.begin.detect(blade);
        self.end.detect(blade);
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        match (self.begin.last_detected_time(), self.end.last_detected_time()) {
            (Some(begin), Some(end)) => begin > end,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Start time of the open span
    pub fn started_at(&self) -> Option<Instant> {
        if self.is_active() {
            self.begin.last_detected_time()
        } else {
            None
        }
    }
}
