//! Boolean audio features and their persistence mapping.
//!
//! | Flag       | Bit    | Persisted |
//! |------------|--------|-----------|
//! | `Mute`     | `0x01` | no        |
//! | `Loudness` | `0x02` | yes       |
//! | `Surround` | `0x04` | yes       |
//! | `Effect3d` | `0x08` | yes       |
//! | `Bypass`   | `0x10` | yes       |
//!
//! Mute is a session state. [`PersistedFlags`] has no mute field, so a value
//! written to the settings store cannot carry it.

/// One boolean audio feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag {
    Mute,
    Loudness,
    Surround,
    Effect3d,
    Bypass,
}

impl Flag {
    /// Flags written to the settings store, in power-on replay order.
    pub const PERSISTED: [Flag; 4] = [Flag::Loudness, Flag::Surround, Flag::Effect3d, Flag::Bypass];

    /// Bit position in the stored flag word.
    pub const fn bit(self) -> u16 {
        match self {
            Flag::Mute => 0x01,
            Flag::Loudness => 0x02,
            Flag::Surround => 0x04,
            Flag::Effect3d => 0x08,
            Flag::Bypass => 0x10,
        }
    }

    pub const fn is_persisted(self) -> bool {
        !matches!(self, Flag::Mute)
    }
}

/// Current state of every feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioFlags {
    pub mute: bool,
    pub loudness: bool,
    pub surround: bool,
    pub effect3d: bool,
    pub bypass: bool,
}

impl AudioFlags {
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Mute => self.mute,
            Flag::Loudness => self.loudness,
            Flag::Surround => self.surround,
            Flag::Effect3d => self.effect3d,
            Flag::Bypass => self.bypass,
        }
    }

    pub fn set(&mut self, flag: Flag, on: bool) {
        match flag {
            Flag::Mute => self.mute = on,
            Flag::Loudness => self.loudness = on,
            Flag::Surround => self.surround = on,
            Flag::Effect3d => self.effect3d = on,
            Flag::Bypass => self.bypass = on,
        }
    }

    /// The subset that survives a power cycle.
    pub fn persisted(&self) -> PersistedFlags {
        PersistedFlags {
            loudness: self.loudness,
            surround: self.surround,
            effect3d: self.effect3d,
            bypass: self.bypass,
        }
    }
}

impl From<PersistedFlags> for AudioFlags {
    /// Restore flags from storage. Mute always comes back cleared.
    fn from(p: PersistedFlags) -> Self {
        Self {
            mute: false,
            loudness: p.loudness,
            surround: p.surround,
            effect3d: p.effect3d,
            bypass: p.bypass,
        }
    }
}

/// Flags as stored in the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedFlags {
    pub loudness: bool,
    pub surround: bool,
    pub effect3d: bool,
    pub bypass: bool,
}

impl PersistedFlags {
    /// Decode a stored flag word. Bits outside the persisted set (including
    /// a mute bit written by older firmware) are ignored.
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            loudness: bits & Flag::Loudness.bit() != 0,
            surround: bits & Flag::Surround.bit() != 0,
            effect3d: bits & Flag::Effect3d.bit() != 0,
            bypass: bits & Flag::Bypass.bit() != 0,
        }
    }

    pub const fn to_bits(self) -> u16 {
        let mut bits = 0;
        if self.loudness {
            bits |= Flag::Loudness.bit();
        }
        if self.surround {
            bits |= Flag::Surround.bit();
        }
        if self.effect3d {
            bits |= Flag::Effect3d.bit();
        }
        if self.bypass {
            bits |= Flag::Bypass.bit();
        }
        bits
    }
}
