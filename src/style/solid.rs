//! Solid color base layer

use embassy_time::Instant;

use super::Layer;
use crate::{blade::Blade, color::Color16, visible::VisibleEffect};

/// Fills the whole blade with one color
#[derive(Debug, Clone)]
pub struct SolidLayer {
    color: Color16,
}

impl SolidLayer {
    pub const fn new(color: Color16) -> Self {
        Self { color }
    }

    pub fn set_color(&mut self, color: Color16) {
        self.color = color;
    }
}

impl Layer for SolidLayer {
    fn run(&mut self, _blade: &dyn Blade, _now: Instant, _visible: &mut VisibleEffect) {}

    fn color(&self, _index: usize, _led_count: usize) -> Option<Color16> {
        Some(self.color)
    }
}
