//! Button identities

/// A debounced button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Up,
    Down,
    Enter,
    Esc,
}

impl Key {
    /// Keys in priority order, matching raw mask bits 0..=3
    pub const PRIORITY: [Key; 4] = [Key::Up, Key::Down, Key::Enter, Key::Esc];

    /// Bit of this key in a raw button mask
    pub fn mask(self) -> u8 {
        match self {
            Key::Up => 1 << 0,
            Key::Down => 1 << 1,
            Key::Enter => 1 << 2,
            Key::Esc => 1 << 3,
        }
    }

    /// Highest-priority key held in `mask`
    pub fn from_mask(mask: u8) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|key| mask & key.mask() != 0)
    }
}
