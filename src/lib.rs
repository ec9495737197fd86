#![no_std]

pub mod blade;
pub mod channel;
pub mod color;
pub mod detector;
pub mod effect;
pub mod feature;
pub mod frame_scheduler;
pub mod style;
pub mod visible;

pub use blade::{Blade, BladeConfig, BladeStyle, LedBlade};
pub use channel::{EffectChannel, EffectReceiver, EffectSender};
pub use detector::{OneshotDetector, SpanDetector};
pub use effect::{BladeEffect, EffectKind, EffectLocation, EffectQueue};
pub use feature::{FeatureRegistry, HandledFeature, HandledFeatureSet, StyleGraphBuilder};
pub use frame_scheduler::{FrameResult, FrameScheduler, SchedulerConfig};
pub use style::{LayerConfig, LayerSlot, Style, StyleError};
pub use visible::{VisibleEffect, VisibleEffectGuard};

pub use color::{Color16, ColorByteOrder, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write one blade's frame to its LED strip
    fn write(&mut self, blade: usize, byte_order: ColorByteOrder, colors: &[Rgb]);
}
