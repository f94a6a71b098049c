use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Keypad buttons, bit positions match the hardware key register.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Keys: u16 {
        const A      = 1;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;

        const DIRECTIONS = Self::RIGHT.bits() | Self::LEFT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

impl Keys {
    /// Value the key register reads while these keys are held; buttons are active low.
    pub const fn raw_register(self) -> u16 {
        !self.bits() & Self::all().bits()
    }
}

/// Held keys for this tick and the previous one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    current: Keys,
    previous: Keys,
}

impl KeyState {
    pub fn poll(&mut self, held: Keys) {
        self.previous = self.current;
        self.current = held;
    }

    /// Keys among `keys` pressed this tick but not the one before.
    pub fn hit(&self, keys: Keys) -> Keys {
        self.current.difference(self.previous) & keys
    }

    pub fn held(&self, keys: Keys) -> Keys {
        self.current & keys
    }

    pub fn current(&self) -> Keys {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_only_on_first_tick() {
        let mut keys = KeyState::default();
        keys.poll(Keys::A);
        assert_eq!(keys.hit(Keys::A), Keys::A);
        keys.poll(Keys::A);
        assert!(keys.hit(Keys::A).is_empty());
        assert_eq!(keys.held(Keys::A | Keys::B), Keys::A);
        keys.poll(Keys::empty());
        keys.poll(Keys::A | Keys::B);
        assert_eq!(keys.hit(Keys::all()), Keys::A | Keys::B);
    }

    #[test]
    fn raw_register_is_active_low() {
        assert_eq!(Keys::empty().raw_register(), 0x03FF);
        assert_eq!(Keys::A.raw_register(), 0x03FE);
        assert_eq!(Keys::all().raw_register(), 0);
    }
}
