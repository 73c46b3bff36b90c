//! Level-triggered input shared between the event layer and the frame loop
//!
//! Key handlers (any thread) flip bits in an [`InputLatch`]; the session
//! reads one [`InputSnapshot`] per update. Reading never clears a key, so a
//! held key keeps acting until it is released.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::sim::TickInput;

/// Abstract game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Pause,
}

bitflags::bitflags! {
    /// Set of held keys as stored in the latch
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(transparent)]
    pub struct Keys: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP  = 1 << 2;
        const PAUSE = 1 << 3;
    }
}

impl From<Key> for Keys {
    fn from(key: Key) -> Self {
        match key {
            Key::Left => Keys::LEFT,
            Key::Right => Keys::RIGHT,
            Key::Jump => Keys::JUMP,
            Key::Pause => Keys::PAUSE,
        }
    }
}

/// Atomic bitset of held keys
#[derive(Debug, Default)]
pub struct InputLatch {
    bits: AtomicU8,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key as held or released
    pub fn set(&self, key: Key, down: bool) {
        let bit = Keys::from(key).bits();
        if down {
            self.bits.fetch_or(bit, Ordering::Relaxed);
        } else {
            self.bits.fetch_and(!bit, Ordering::Relaxed);
        }
    }

    pub fn press(&self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&self, key: Key) {
        self.set(key, false);
    }

    /// Release every key
    pub fn clear(&self) {
        self.bits.store(0, Ordering::Relaxed);
    }

    /// Currently held keys
    pub fn keys(&self) -> Keys {
        Keys::from_bits_truncate(self.bits.load(Ordering::Relaxed))
    }

    /// Read the current key state without consuming it
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::from(self.keys())
    }
}

/// Keys held at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub pause: bool,
}

impl From<Keys> for InputSnapshot {
    fn from(keys: Keys) -> Self {
        Self {
            left: keys.contains(Keys::LEFT),
            right: keys.contains(Keys::RIGHT),
            jump: keys.contains(Keys::JUMP),
            pause: keys.contains(Keys::PAUSE),
        }
    }
}

impl InputSnapshot {
    /// -1 for left, 1 for right, 0 for neither or both
    pub fn move_direction(&self) -> i8 {
        i8::from(self.right) - i8::from(self.left)
    }

    /// Movement commands for one tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            direction: self.move_direction(),
            jump: self.jump,
        }
    }
}
