//! Blade effect records
//!
//! A [`BladeEffect`] describes one occurrence of a transient event (clash,
//! stab, blast, ...) as produced by the motion, audio or button handlers.
//! Blades keep the most recent ones in an [`EffectQueue`] that styles scan
//! once per frame.

mod queue;

use embassy_time::{Duration, Instant};
pub use queue::{EFFECT_LIFETIME, EffectQueue, MAX_EFFECTS};

/// Declare the effect kinds together with their raw ids and names
macro_rules! effect_kinds {
    ($($(#[$meta:meta])* $variant:ident = $id:literal => $name:literal),* $(,)?) => {
        /// Kind of a blade effect.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum EffectKind {
            $($(#[$meta])* $variant = $id,)*
        }

        impl EffectKind {
            /// Every known kind, ordered by raw id
            pub const ALL: &[EffectKind] = &[$(Self::$variant,)*];

            pub const fn from_raw(value: u8) -> Option<Self> {
                match value {
                    $($id => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            pub fn parse_from_str(s: &str) -> Option<Self> {
                match s {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

effect_kinds! {
    None = 0 => "none",
    Clash = 1 => "clash",
    Blast = 2 => "blast",
    Force = 3 => "force",
    Stab = 4 => "stab",
    Boot = 5 => "boot",
    LockupBegin = 6 => "lockup_begin",
    LockupEnd = 7 => "lockup_end",
    DragBegin = 8 => "drag_begin",
    DragEnd = 9 => "drag_end",
    MeltBegin = 10 => "melt_begin",
    MeltEnd = 11 => "melt_end",
    LightningBlockBegin = 12 => "lightning_block_begin",
    LightningBlockEnd = 13 => "lightning_block_end",
    Preon = 14 => "preon",
    Postoff = 15 => "postoff",
    Ignition = 16 => "ignition",
    Retraction = 17 => "retraction",
    Change = 18 => "change",
    NewFont = 19 => "new_font",
    LowBattery = 20 => "low_battery",
    BatteryLevel = 21 => "battery_level",
    VolumeLevel = 22 => "volume_level",
    On = 23 => "on",
    FastOn = 24 => "fast_on",
    Off = 25 => "off",
    FastOff = 26 => "fast_off",
    Quote = 27 => "quote",
    NextQuote = 28 => "next_quote",
    /// Preon that waits for the user before igniting
    InteractivePreon = 29 => "interactive_preon",
    /// Blast that has to be deflected by a swing
    InteractiveBlast = 30 => "interactive_blast",
}

/// Where along the blade an effect is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EffectLocation {
    #[default]
    Base,
    Tip,
}

impl EffectLocation {
    /// Anchor from a position along the blade (0.0 = base, 1.0 = tip)
    pub fn from_fraction(position: f32) -> Self {
        if position < 0.5 { Self::Base } else { Self::Tip }
    }
}

/// Longest sound length an effect can report
pub const MAX_SOUND_LENGTH: Duration = Duration::from_secs(3600);

/// One detected occurrence of an effect.
///
/// `start_time` is the identity of the occurrence: two records with the
/// same start time are the same occurrence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeEffect {
    pub kind: EffectKind,
    pub start_time: Instant,
    pub location: EffectLocation,
    /// Length of the sample played for this effect, in seconds
    pub sound_duration: f32,
    /// Which of the randomized samples was played
    pub sound_index: i32,
}

impl BladeEffect {
    pub const fn new(kind: EffectKind, start_time: Instant) -> Self {
        Self {
            kind,
            start_time,
            location: EffectLocation::Base,
            sound_duration: 0.0,
            sound_index: 0,
        }
    }

    #[must_use]
    pub const fn at(mut self, location: EffectLocation) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub const fn with_sound(mut self, duration_secs: f32, index: i32) -> Self {
        self.sound_duration = duration_secs;
        self.sound_index = index;
        self
    }

    /// Sound length as a duration
    ///
    /// Negative or NaN lengths read as zero, lengths past
    /// [`MAX_SOUND_LENGTH`] (infinity included) read as the maximum.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn sound_length(&self) -> Duration {
        let micros = libm::roundf(self.sound_duration * 1_000_000.0);
        if micros.is_nan() || micros <= 0.0 {
            return Duration::from_micros(0);
        }
        if micros >= MAX_SOUND_LENGTH.as_micros() as f32 {
            return MAX_SOUND_LENGTH;
        }
        Duration::from_micros(micros as u64)
    }

    /// Time elapsed since the occurrence started
    pub fn age(&self, now: Instant) -> Duration {
        now.checked_duration_since(self.start_time)
            .unwrap_or(Duration::from_micros(0))
    }
}
