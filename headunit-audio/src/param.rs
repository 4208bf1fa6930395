//! The audio parameter set: everything the processor remembers.
//!
//! [`AudioParam`] holds the selected IC, the active input, feature flags,
//! the speaker mode, per-input gain staging and source types, and the
//! [`TuneTable`]. [`AudioParam::load`] and [`AudioParam::save`] map it to
//! the settings store.
//!
//! # Gain staging
//!
//! Each input slot remembers its own gain in `gain[slot]`. The
//! [`TuneAxis::Gain`] axis always shows the gain of the active input:
//! selecting an input copies `gain[input]` into the axis, and setting the
//! axis writes back to `gain[input]`.

use crate::constants::MAX_INPUTS;
use crate::flags::{AudioFlags, PersistedFlags};
use crate::ic::{AudioIc, AudioMode};
use crate::settings::{Param, SettingsStore};
use crate::tune::{TuneAxis, TuneTable};

/// What is plugged into an input slot. Used for labels only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputType {
    #[default]
    Tuner = 0,
    Pc,
    Tv,
    Bluetooth,
    Dvd,
    Usb,
    Microphone,
    Guitar,
    Turntables,
    SdCard,
    Projector,
    Satellite,
    Mixer,
    InternetRadio,
}

impl InputType {
    /// Decode a stored value. Unknown values map to [`InputType::Tuner`].
    pub const fn from_raw(raw: i16) -> Self {
        match raw {
            1 => InputType::Pc,
            2 => InputType::Tv,
            3 => InputType::Bluetooth,
            4 => InputType::Dvd,
            5 => InputType::Usb,
            6 => InputType::Microphone,
            7 => InputType::Guitar,
            8 => InputType::Turntables,
            9 => InputType::SdCard,
            10 => InputType::Projector,
            11 => InputType::Satellite,
            12 => InputType::Mixer,
            13 => InputType::InternetRadio,
            _ => InputType::Tuner,
        }
    }

    pub const fn to_raw(self) -> i16 {
        self as i16
    }
}

/// Persisted and session state of the audio processor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioParam {
    pub(crate) ic: AudioIc,
    pub(crate) input: u8,
    pub(crate) flags: AudioFlags,
    pub(crate) mode: AudioMode,
    pub(crate) gain: [i8; MAX_INPUTS],
    pub(crate) input_types: [InputType; MAX_INPUTS],
    pub(crate) tune: TuneTable,
}

impl AudioParam {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ic(&self) -> AudioIc {
        self.ic
    }

    /// Active input slot, always below `ic().input_count()`.
    pub fn input(&self) -> u8 {
        self.input
    }

    pub fn flags(&self) -> &AudioFlags {
        &self.flags
    }

    pub fn mode(&self) -> AudioMode {
        self.mode
    }

    /// Remembered gain of input `slot` (0 for slots past [`MAX_INPUTS`]).
    pub fn gain(&self, slot: usize) -> i8 {
        self.gain.get(slot).copied().unwrap_or(0)
    }

    pub fn gains(&self) -> &[i8; MAX_INPUTS] {
        &self.gain
    }

    /// Source type of input `slot` ([`InputType::Tuner`] past [`MAX_INPUTS`]).
    pub fn input_type(&self, slot: usize) -> InputType {
        self.input_types.get(slot).copied().unwrap_or_default()
    }

    pub fn tune(&self) -> &TuneTable {
        &self.tune
    }

    /// Shortcut for `tune().value(axis)`.
    pub fn value(&self, axis: TuneAxis) -> i8 {
        self.tune.value(axis)
    }

    /// Whether `mode` is available on the selected IC.
    pub fn is_mode_supported(&self, mode: AudioMode) -> bool {
        crate::ic::is_mode_supported(self.ic, mode)
    }

    /// Read the parameter set from `store`.
    ///
    /// `default_ic` is used when no IC was ever stored. The input is wrapped
    /// to 0 if it does not exist on the stored IC. Grids are not bound here;
    /// the tune values are taken as stored and clamped once a driver binds
    /// its grids.
    pub fn load<S: SettingsStore + ?Sized>(store: &S, default_ic: AudioIc) -> Self {
        let mut par = AudioParam::new();

        par.ic = AudioIc::from_raw(store.read(Param::AudioIc, default_ic.to_raw()));
        let input = store.read(Param::AudioInput, 0);
        par.input = if input >= 0 && input < par.ic.input_count() as i16 {
            input as u8
        } else {
            0
        };
        par.flags = AudioFlags::from(PersistedFlags::from_bits(
            store.read(Param::AudioFlags, 0) as u16,
        ));
        par.mode = AudioMode::from_raw(store.read(Param::AudioMode, AudioMode::Stereo.to_raw()));

        for slot in 0..MAX_INPUTS {
            par.gain[slot] = store.read(Param::gain(slot), 0) as i8;
            par.input_types[slot] =
                InputType::from_raw(store.read(Param::input_type(slot), InputType::Tuner.to_raw()));
        }

        for axis in TuneAxis::ALL {
            if let Some(key) = Param::tune(axis) {
                par.tune.item_mut(axis).set_raw(store.read(key, 0) as i8);
            }
        }
        par.tune
            .item_mut(TuneAxis::Gain)
            .set_raw(par.gain[par.input as usize]);

        par
    }

    /// Write every persisted field to `store`. Mute is never written.
    pub fn save<S: SettingsStore + ?Sized>(&self, store: &mut S) {
        store.store(Param::AudioIc, self.ic.to_raw());
        store.store(Param::AudioInput, self.input as i16);
        store.store(Param::AudioFlags, self.flags.persisted().to_bits() as i16);
        store.store(Param::AudioMode, self.mode.to_raw());

        for axis in TuneAxis::ALL {
            if let Some(key) = Param::tune(axis) {
                store.store(key, self.tune.value(axis) as i16);
            }
        }

        for slot in 0..MAX_INPUTS {
            store.store(Param::gain(slot), self.gain[slot] as i16);
            store.store(Param::input_type(slot), self.input_types[slot].to_raw());
        }
    }
}
