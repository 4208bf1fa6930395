//! Persistence adapter: keys and the key/value store interface.
//!
//! The store itself (EEPROM emulation with wear levelling, battery-backed
//! RAM, ...) lives outside this crate. [`MemoryStore`] keeps values in RAM
//! and is used by the tests and on targets without persistent memory.

use crate::constants::MAX_INPUTS;
use crate::tune::TuneAxis;

/// Settings keys owned by the audio processor.
///
/// Discriminants are the slot numbers in the settings memory map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Param {
    AudioIc = 0x00,
    AudioInput = 0x01,
    AudioFlags = 0x02,

    AudioInputType0 = 0x03,
    AudioInputType1,
    AudioInputType2,
    AudioInputType3,
    AudioInputType4,
    AudioInputType5,
    AudioInputType6,
    AudioInputType7,

    AudioMode = 0x0B,

    AudioVolume = 0x10,
    AudioBass,
    AudioMiddle,
    AudioTreble,
    AudioFrontRear,
    AudioBalance,
    AudioCenter,
    AudioSubwoofer,
    AudioPreamp,

    AudioGain0 = 0x19,
    AudioGain1,
    AudioGain2,
    AudioGain3,
    AudioGain4,
    AudioGain5,
    AudioGain6,
    AudioGain7,
}

impl Param {
    /// Number of slots spanned by the audio keys.
    pub const SLOTS: usize = Param::AudioGain7 as usize + 1;

    const INPUT_TYPES: [Param; MAX_INPUTS] = [
        Param::AudioInputType0,
        Param::AudioInputType1,
        Param::AudioInputType2,
        Param::AudioInputType3,
        Param::AudioInputType4,
        Param::AudioInputType5,
        Param::AudioInputType6,
        Param::AudioInputType7,
    ];

    const GAINS: [Param; MAX_INPUTS] = [
        Param::AudioGain0,
        Param::AudioGain1,
        Param::AudioGain2,
        Param::AudioGain3,
        Param::AudioGain4,
        Param::AudioGain5,
        Param::AudioGain6,
        Param::AudioGain7,
    ];

    /// Gain-staging slot for input `slot`.
    pub const fn gain(slot: usize) -> Param {
        Self::GAINS[slot]
    }

    /// Source-type slot for input `slot`.
    pub const fn input_type(slot: usize) -> Param {
        Self::INPUT_TYPES[slot]
    }

    /// Key of a persisted tune axis. The gain axis is stored per input
    /// through [`Param::gain`] instead and returns `None`.
    pub const fn tune(axis: TuneAxis) -> Option<Param> {
        match axis {
            TuneAxis::Volume => Some(Param::AudioVolume),
            TuneAxis::Bass => Some(Param::AudioBass),
            TuneAxis::Middle => Some(Param::AudioMiddle),
            TuneAxis::Treble => Some(Param::AudioTreble),
            TuneAxis::FrontRear => Some(Param::AudioFrontRear),
            TuneAxis::Balance => Some(Param::AudioBalance),
            TuneAxis::Center => Some(Param::AudioCenter),
            TuneAxis::Subwoofer => Some(Param::AudioSubwoofer),
            TuneAxis::Preamp => Some(Param::AudioPreamp),
            TuneAxis::Gain => None,
        }
    }

    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// Integer key/value store with per-read defaults.
pub trait SettingsStore {
    /// Stored value of `key`, or `default` if nothing was ever stored.
    fn read(&self, key: Param, default: i16) -> i16;

    /// Store `value` under `key`.
    fn store(&mut self, key: Param, value: i16);
}

/// RAM-backed [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    slots: [Option<i16>; Param::SLOTS],
    writes: u32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub const fn new() -> Self {
        Self {
            slots: [None; Param::SLOTS],
            writes: 0,
        }
    }

    /// Raw slot content, `None` if never written.
    pub fn get(&self, key: Param) -> Option<i16> {
        self.slots[key.slot()]
    }

    /// Total number of `store` calls since creation.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, key: Param, default: i16) -> i16 {
        self.slots[key.slot()].unwrap_or(default)
    }

    fn store(&mut self, key: Param, value: i16) {
        self.slots[key.slot()] = Some(value);
        self.writes += 1;
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn read(&self, key: Param, default: i16) -> i16 {
        (**self).read(key, default)
    }

    fn store(&mut self, key: Param, value: i16) {
        (**self).store(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_layout() {
        assert_eq!(Param::AudioInputType7.slot(), 0x0A);
        assert_eq!(Param::AudioPreamp.slot(), 0x18);
        assert_eq!(Param::AudioGain0.slot(), 0x19);
        assert_eq!(Param::SLOTS, 0x21);
    }

    #[test]
    fn tune_keys_follow_axis_order() {
        let mut prev = None;
        for axis in TuneAxis::ALL {
            match Param::tune(axis) {
                Some(key) => {
                    assert_eq!(key.slot(), Param::AudioVolume.slot() + axis.index());
                    if let Some(p) = prev {
                        assert!(key.slot() > p);
                    }
                    prev = Some(key.slot());
                }
                None => assert_eq!(axis, TuneAxis::Gain),
            }
        }
    }

    #[test]
    fn per_input_keys() {
        for slot in 0..MAX_INPUTS {
            assert_eq!(Param::gain(slot).slot(), Param::AudioGain0.slot() + slot);
            assert_eq!(Param::input_type(slot).slot(), Param::AudioInputType0.slot() + slot);
        }
    }

    #[test]
    fn memory_store_defaults_and_writes() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read(Param::AudioIc, 7), 7);
        assert_eq!(store.get(Param::AudioIc), None);

        store.store(Param::AudioIc, 3);
        assert_eq!(store.read(Param::AudioIc, 7), 3);
        assert_eq!(store.get(Param::AudioIc), Some(3));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn store_through_mut_ref() {
        fn save_volume<S: SettingsStore>(mut store: S) {
            store.store(Param::AudioVolume, -20);
        }

        let mut store = MemoryStore::new();
        save_volume(&mut store);
        assert_eq!(store.get(Param::AudioVolume), Some(-20));
    }
}
