//! TDA7439 / TDA7440 three-band (two-band) tone processor.
//!
//! Stereo only: the balance axis drives the left/right speaker attenuators,
//! the volume axis is folded into both of them. The TDA7440 is register
//! compatible but has no middle band.

use embedded_hal::i2c::I2c;

use super::registers::tda7439 as reg;
use super::{attenuation, tone_code};
use crate::control::{AudioApi, Capabilities, Capability};
use crate::matrix::compute_channel_gains;
use crate::param::AudioParam;
use crate::tune::{Grid, GridMap, TuneAxis};

static VOLUME: Grid = Grid::new(-79, 0, 8);
static TONE: Grid = Grid::new(-7, 7, 16);
static BALANCE: Grid = Grid::new(-7, 7, 8);
static PREAMP: Grid = Grid::new(-47, 0, 8);
static GAIN: Grid = Grid::new(0, 15, 16);

const CAPS: Capabilities = Capabilities::NONE
    .with(Capability::Init)
    .with(Capability::SetTune)
    .with(Capability::SetInput)
    .with(Capability::SetMute);

/// Which member of the family is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    Tda7439,
    /// No middle band.
    Tda7440,
}

/// TDA7439 / TDA7440 driver.
pub struct Tda7439<I2C> {
    i2c: I2C,
    address: u8,
    variant: Variant,
    /// Last computed speaker attenuation, restored on unmute.
    speaker: [u8; 2],
    muted: bool,
}

impl<I2C> Tda7439<I2C>
where
    I2C: I2c,
{
    pub const DEFAULT_ADDRESS: u8 = reg::I2C_ADDR;

    /// Create a driver at the default address.
    pub fn new(i2c: I2C, variant: Variant) -> Self {
        Self::new_with_address(i2c, variant, Self::DEFAULT_ADDRESS)
    }

    /// Shortcut for a TDA7440 at the default address.
    pub fn new_tda7440(i2c: I2C) -> Self {
        Self::new(i2c, Variant::Tda7440)
    }

    pub fn new_with_address(i2c: I2C, variant: Variant, address: u8) -> Self {
        Self {
            i2c,
            address,
            variant,
            speaker: [reg::SP_MUTE; 2],
            muted: false,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Write one sub-address/value pair.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    /// Consume the driver and return the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_speakers(&mut self) -> Result<(), I2C::Error> {
        let [left, right] = if self.muted {
            [reg::SP_MUTE; 2]
        } else {
            self.speaker
        };
        self.write_register(reg::SPEAKER_LEFT, left)?;
        self.write_register(reg::SPEAKER_RIGHT, right)
    }

    fn set_speakers(&mut self, par: &AudioParam) -> Result<(), I2C::Error> {
        let gains = compute_channel_gains(par.tune(), par.value(TuneAxis::Volume), false);
        self.speaker = [
            attenuation(gains.front_left, reg::SP_MAX_ATT),
            attenuation(gains.front_right, reg::SP_MAX_ATT),
        ];
        if self.muted {
            return Ok(());
        }
        self.write_speakers()
    }
}

impl<I2C> AudioApi for Tda7439<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn capabilities(&self) -> Capabilities {
        CAPS
    }

    fn init(&mut self, grids: &mut GridMap) -> Result<(), Self::Error> {
        grids.bind(TuneAxis::Volume, &VOLUME);
        grids.bind(TuneAxis::Bass, &TONE);
        if self.variant == Variant::Tda7439 {
            grids.bind(TuneAxis::Middle, &TONE);
        }
        grids.bind(TuneAxis::Treble, &TONE);
        grids.bind(TuneAxis::Balance, &BALANCE);
        grids.bind(TuneAxis::Preamp, &PREAMP);
        grids.bind(TuneAxis::Gain, &GAIN);
        Ok(())
    }

    fn set_tune(&mut self, par: &AudioParam, axis: TuneAxis, value: i8) -> Result<(), Self::Error> {
        match axis {
            TuneAxis::Volume | TuneAxis::Balance => self.set_speakers(par),
            TuneAxis::Bass => self.write_register(reg::BASS, tone_code(value)),
            TuneAxis::Middle if self.variant == Variant::Tda7439 => {
                self.write_register(reg::MIDDLE, tone_code(value))
            }
            TuneAxis::Treble => self.write_register(reg::TREBLE, tone_code(value)),
            TuneAxis::Preamp => self.write_register(reg::VOLUME, attenuation(value as i16, 47)),
            TuneAxis::Gain => self.write_register(reg::INPUT_GAIN, value.clamp(0, 15) as u8),
            _ => Ok(()),
        }
    }

    fn set_input(&mut self, input: u8) -> Result<(), Self::Error> {
        let code = reg::IN_CNT - 1 - input.min(reg::IN_CNT - 1);
        self.write_register(reg::INPUT_SELECT, code)
    }

    fn set_mute(&mut self, on: bool) -> Result<(), Self::Error> {
        self.muted = on;
        self.write_speakers()
    }
}
