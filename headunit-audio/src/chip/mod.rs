//! Audio processor IC drivers.
//!
//! Each driver is generic over an [`embedded_hal::i2c::I2c`] bus and
//! implements [`AudioApi`] for the operations its chip supports.
//! [`Driver`] is the closed mapping from [`AudioIc`] to a driver instance.
//!
//! | IC             | Driver                 | Feature   |
//! |----------------|------------------------|-----------|
//! | TDA7439/TDA7440| [`Tda7439`]            | `tda7439` |
//! | TDA7313        | [`Tda731x`]            | `tda731x` |
//! | PT2322+PT2323  | [`Pt232x`]             | `pt232x`  |
//! | Test           | [`Bench`]              | always    |
//!
//! TDA7418 and TDA7719 have no driver: binding them hands the bus back and
//! the processor runs without hardware.

use embedded_hal::i2c::I2c;

use crate::control::{AudioApi, Capabilities};
use crate::ic::AudioIc;
use crate::param::AudioParam;
use crate::tune::{GridMap, TuneAxis};

pub mod registers;

mod bench;
#[cfg(feature = "pt232x")]
mod pt232x;
#[cfg(feature = "tda731x")]
mod tda731x;
#[cfg(feature = "tda7439")]
mod tda7439;

pub use bench::Bench;
#[cfg(feature = "pt232x")]
pub use pt232x::Pt232x;
#[cfg(feature = "tda731x")]
pub use tda731x::Tda731x;
#[cfg(feature = "tda7439")]
pub use tda7439::{Tda7439, Variant};

/// 4-bit tone code shared by the TDA and PT chips.
///
/// `-7..=0` maps to `0x0..=0x7` (cut), `1..=7` maps to `0xE..=0x8` (boost).
pub(crate) fn tone_code(value: i8) -> u8 {
    let value = value.clamp(-7, 7);
    if value > 0 {
        (15 - value) as u8
    } else {
        (7 + value) as u8
    }
}

/// Attenuator code for a channel gain (≤ 0), saturated at `max`.
pub(crate) fn attenuation(gain: i16, max: u8) -> u8 {
    (-gain).clamp(0, max as i16) as u8
}

/// The driver bound to the selected IC.
pub enum Driver<I2C> {
    #[cfg(feature = "tda7439")]
    Tda7439(Tda7439<I2C>),
    #[cfg(feature = "tda731x")]
    Tda731x(Tda731x<I2C>),
    #[cfg(feature = "pt232x")]
    Pt232x(Pt232x<I2C>),
    Bench(Bench<I2C>),
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            #[cfg(feature = "tda7439")]
            Driver::Tda7439($d) => $body,
            #[cfg(feature = "tda731x")]
            Driver::Tda731x($d) => $body,
            #[cfg(feature = "pt232x")]
            Driver::Pt232x($d) => $body,
            Driver::Bench($d) => $body,
        }
    };
}

impl<I2C> Driver<I2C>
where
    I2C: I2c,
{
    /// Create the driver for `ic` on `i2c`.
    ///
    /// Returns the bus unchanged if there is no driver for `ic` (unknown
    /// identifier, or the driver's feature is disabled).
    pub fn bind(ic: AudioIc, i2c: I2C) -> Result<Self, I2C> {
        match ic {
            #[cfg(feature = "tda7439")]
            AudioIc::Tda7439 => Ok(Driver::Tda7439(Tda7439::new(i2c, Variant::Tda7439))),
            #[cfg(feature = "tda7439")]
            AudioIc::Tda7440 => Ok(Driver::Tda7439(Tda7439::new(i2c, Variant::Tda7440))),
            #[cfg(feature = "tda731x")]
            AudioIc::Tda7313 => Ok(Driver::Tda731x(Tda731x::new(i2c))),
            #[cfg(feature = "pt232x")]
            AudioIc::Pt232x => Ok(Driver::Pt232x(Pt232x::new(i2c))),
            AudioIc::Test => Ok(Driver::Bench(Bench::new(i2c))),
            _ => Err(i2c),
        }
    }

    /// Release the driver, returning the bus.
    pub fn release(self) -> I2C {
        dispatch!(self, d => d.release())
    }
}

impl<I2C> AudioApi for Driver<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn capabilities(&self) -> Capabilities {
        dispatch!(self, d => d.capabilities())
    }

    fn init(&mut self, grids: &mut GridMap) -> Result<(), Self::Error> {
        dispatch!(self, d => d.init(grids))
    }

    fn set_tune(&mut self, par: &AudioParam, axis: TuneAxis, value: i8) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_tune(par, axis, value))
    }

    fn set_input(&mut self, input: u8) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_input(input))
    }

    fn set_mute(&mut self, on: bool) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_mute(on))
    }

    fn set_loudness(&mut self, on: bool) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_loudness(on))
    }

    fn set_surround(&mut self, on: bool) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_surround(on))
    }

    fn set_effect3d(&mut self, on: bool) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_effect3d(on))
    }

    fn set_bypass(&mut self, on: bool) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_bypass(on))
    }

    fn set_power(&mut self, on: bool) -> Result<(), Self::Error> {
        dispatch!(self, d => d.set_power(on))
    }
}
