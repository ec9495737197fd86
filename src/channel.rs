//! Effect intake channel
//!
//! Motion, audio and button handlers report effects through an
//! [`EffectChannel`], possibly from interrupt context. The frame scheduler
//! drains it at the start of every frame. Access is guarded by
//! `critical-section`; storage is a fixed-size `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::effect::BladeEffect;

/// Error returned when trying to send to a full channel.
///
/// Carries the rejected effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrySendError(pub BladeEffect);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded channel of sensed effects.
pub struct EffectChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<BladeEffect, SIZE>>>,
}

impl<const SIZE: usize> EffectChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for an effect producer
    pub const fn sender(&self) -> EffectSender<'_, SIZE> {
        EffectSender { channel: self }
    }

    /// Handle for the frame scheduler
    pub const fn receiver(&self) -> EffectReceiver<'_, SIZE> {
        EffectReceiver { channel: self }
    }

    pub fn try_send(&self, effect: BladeEffect) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(effect).map_err(TrySendError)
        })
    }

    pub fn try_receive(&self) -> Result<BladeEffect, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of pending effects
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for EffectChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of an [`EffectChannel`].
#[derive(Clone, Copy)]
pub struct EffectSender<'a, const SIZE: usize> {
    channel: &'a EffectChannel<SIZE>,
}

impl<const SIZE: usize> EffectSender<'_, SIZE> {
    pub fn try_send(&self, effect: BladeEffect) -> Result<(), TrySendError> {
        self.channel.try_send(effect)
    }
}

/// Consumer side of an [`EffectChannel`].
#[derive(Clone, Copy)]
pub struct EffectReceiver<'a, const SIZE: usize> {
    channel: &'a EffectChannel<SIZE>,
}

impl<'a, const SIZE: usize> EffectReceiver<'a, SIZE> {
    pub fn try_receive(&self) -> Result<BladeEffect, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Iterate over pending effects until the channel is empty
    pub fn drain(self) -> impl Iterator<Item = BladeEffect> + 'a {
        let channel = self.channel;
        core::iter::from_fn(move || channel.try_receive().ok())
    }
}
