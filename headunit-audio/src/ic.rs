//! Audio processor IC identifiers and their static properties.
//!
//! Input counts and channel-mode support are fixed per chip and do not
//! depend on whether a driver for the chip is compiled in.

use crate::constants::MAX_INPUTS;

/// Audio processor IC selected in the settings.
///
/// The discriminants are the values written to the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioIc {
    /// No processor configured.
    #[default]
    None = 0,
    Tda7439 = 1,
    /// TDA7439 without the middle band.
    Tda7440 = 2,
    Tda7313 = 3,
    /// PT2322 volume/tone processor paired with a PT2323 input switch.
    Pt232x = 4,
    Tda7418 = 5,
    Tda7719 = 6,
    /// Bench setup: grids only, no transport.
    Test = 7,
}

impl AudioIc {
    /// Decode a stored identifier. Unknown values map to [`AudioIc::None`].
    pub const fn from_raw(raw: i16) -> Self {
        match raw {
            1 => AudioIc::Tda7439,
            2 => AudioIc::Tda7440,
            3 => AudioIc::Tda7313,
            4 => AudioIc::Pt232x,
            5 => AudioIc::Tda7418,
            6 => AudioIc::Tda7719,
            7 => AudioIc::Test,
            _ => AudioIc::None,
        }
    }

    pub const fn to_raw(self) -> i16 {
        self as i16
    }

    /// Number of selectable inputs on this IC.
    pub const fn input_count(self) -> u8 {
        match self {
            AudioIc::Tda7439 | AudioIc::Tda7440 => 4,
            AudioIc::Tda7313 => 3,
            AudioIc::Pt232x => 5,
            AudioIc::Tda7418 => 4,
            AudioIc::Tda7719 => 6,
            AudioIc::Test => MAX_INPUTS as u8,
            AudioIc::None => 1,
        }
    }
}

/// Speaker layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioMode {
    #[default]
    Stereo = 0,
    /// Stereo plus subwoofer.
    Mode2_1 = 1,
    /// Front and rear pairs.
    Mode4_0 = 2,
    Mode4_1 = 3,
    Mode5_1 = 4,
}

impl AudioMode {
    pub const ALL: [AudioMode; 5] = [
        AudioMode::Stereo,
        AudioMode::Mode2_1,
        AudioMode::Mode4_0,
        AudioMode::Mode4_1,
        AudioMode::Mode5_1,
    ];

    /// Decode a stored mode. Unknown values fall back to stereo.
    pub const fn from_raw(raw: i16) -> Self {
        match raw {
            1 => AudioMode::Mode2_1,
            2 => AudioMode::Mode4_0,
            3 => AudioMode::Mode4_1,
            4 => AudioMode::Mode5_1,
            _ => AudioMode::Stereo,
        }
    }

    pub const fn to_raw(self) -> i16 {
        self as i16
    }
}

/// Whether `ic` can drive the speaker layout `mode`.
///
/// Consulted by the menu before a mode change; [`Processor::set_mode`]
/// itself does not check it.
///
/// [`Processor::set_mode`]: crate::processor::Processor::set_mode
pub const fn is_mode_supported(ic: AudioIc, mode: AudioMode) -> bool {
    match mode {
        AudioMode::Stereo => true,
        AudioMode::Mode2_1 | AudioMode::Mode4_0 => matches!(
            ic,
            AudioIc::Tda7313 | AudioIc::Pt232x | AudioIc::Tda7418 | AudioIc::Tda7719
        ),
        AudioMode::Mode4_1 => matches!(ic, AudioIc::Pt232x | AudioIc::Tda7418 | AudioIc::Tda7719),
        AudioMode::Mode5_1 => matches!(ic, AudioIc::Pt232x),
    }
}
