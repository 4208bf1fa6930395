//! PT2322 six-channel processor with PT2323 input switch.
//!
//! The PT2322 handles volume, tone and the per-channel trims; the PT2323 in
//! front of it selects the input and owns surround and the all-channel
//! mute used for power sequencing. Both take single command bytes.

use embedded_hal::i2c::I2c;

use super::registers::{pt2322, pt2323};
use super::{attenuation, tone_code};
use crate::control::{AudioApi, Capabilities, Capability};
use crate::matrix::compute_channel_gains;
use crate::param::AudioParam;
use crate::tune::{Grid, GridMap, TuneAxis};

static VOLUME: Grid = Grid::new(-79, 0, 8);
static TONE: Grid = Grid::new(-7, 7, 16);
static BALANCE: Grid = Grid::new(-7, 7, 8);
static TRIM: Grid = Grid::new(-15, 0, 8);

const CAPS: Capabilities = Capabilities::NONE
    .with(Capability::Init)
    .with(Capability::SetTune)
    .with(Capability::SetInput)
    .with(Capability::SetMute)
    .with(Capability::SetSurround)
    .with(Capability::SetEffect3d)
    .with(Capability::SetBypass)
    .with(Capability::SetPower);

/// PT2322 + PT2323 driver pair on one bus.
pub struct Pt232x<I2C> {
    i2c: I2C,
    pt2322: u8,
    pt2323: u8,
    /// Cached function register (mute, 3D, tone defeat).
    function: u8,
}

impl<I2C> Pt232x<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_addresses(i2c, pt2322::I2C_ADDR, pt2323::I2C_ADDR)
    }

    pub fn new_with_addresses(i2c: I2C, pt2322: u8, pt2323: u8) -> Self {
        Self {
            i2c,
            pt2322,
            pt2323,
            function: pt2322::FUNC_3D_OFF,
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_2322(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.pt2322, &[command])
    }

    fn write_2323(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.pt2323, &[command])
    }

    fn update_function(&mut self, bit: u8, set: bool) -> Result<(), I2C::Error> {
        if set {
            self.function |= bit;
        } else {
            self.function &= !bit;
        }
        self.write_2322(pt2322::FUNCTION | self.function)
    }

    fn set_volume(&mut self, value: i8) -> Result<(), I2C::Error> {
        let att = attenuation(value as i16, pt2322::VOL_MAX_ATT);
        self.write_2322(pt2322::VOL_10DB | (att / 10))?;
        self.write_2322(pt2322::VOL_1DB | (att % 10))
    }

    fn set_trims(&mut self, par: &AudioParam) -> Result<(), I2C::Error> {
        let gains = compute_channel_gains(par.tune(), 0, false);
        let trims = [
            (pt2322::TRIM_FRONT_LEFT, gains.front_left),
            (pt2322::TRIM_FRONT_RIGHT, gains.front_right),
            (pt2322::TRIM_CENTER, gains.center),
            (pt2322::TRIM_REAR_LEFT, gains.rear_left),
            (pt2322::TRIM_REAR_RIGHT, gains.rear_right),
            (pt2322::TRIM_SUBWOOFER, gains.subwoofer),
        ];
        for (base, gain) in trims {
            self.write_2322(base | attenuation(gain, pt2322::TRIM_MAX))?;
        }
        Ok(())
    }
}

impl<I2C> AudioApi for Pt232x<I2C>
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
        grids.bind(TuneAxis::Middle, &TONE);
        grids.bind(TuneAxis::Treble, &TONE);
        grids.bind(TuneAxis::FrontRear, &BALANCE);
        grids.bind(TuneAxis::Balance, &BALANCE);
        grids.bind(TuneAxis::Center, &TRIM);
        grids.bind(TuneAxis::Subwoofer, &TRIM);

        self.write_2322(pt2322::CLEAR)?;
        self.write_2322(pt2322::INPUT_SW)
    }

    fn set_tune(&mut self, par: &AudioParam, axis: TuneAxis, value: i8) -> Result<(), Self::Error> {
        match axis {
            TuneAxis::Volume => self.set_volume(value),
            TuneAxis::Bass => self.write_2322(pt2322::BASS | tone_code(value)),
            TuneAxis::Middle => self.write_2322(pt2322::MIDDLE | tone_code(value)),
            TuneAxis::Treble => self.write_2322(pt2322::TREBLE | tone_code(value)),
            TuneAxis::FrontRear | TuneAxis::Balance | TuneAxis::Center | TuneAxis::Subwoofer => {
                self.set_trims(par)
            }
            TuneAxis::Preamp | TuneAxis::Gain => Ok(()),
        }
    }

    fn set_input(&mut self, input: u8) -> Result<(), Self::Error> {
        let last = pt2323::INPUTS.len() - 1;
        self.write_2323(pt2323::INPUTS[(input as usize).min(last)])
    }

    fn set_mute(&mut self, on: bool) -> Result<(), Self::Error> {
        self.update_function(pt2322::FUNC_MUTE, on)
    }

    fn set_surround(&mut self, on: bool) -> Result<(), Self::Error> {
        self.write_2323(if on {
            pt2323::SURROUND_ON
        } else {
            pt2323::SURROUND_OFF
        })
    }

    fn set_effect3d(&mut self, on: bool) -> Result<(), Self::Error> {
        self.update_function(pt2322::FUNC_3D_OFF, !on)
    }

    fn set_bypass(&mut self, on: bool) -> Result<(), Self::Error> {
        self.update_function(pt2322::FUNC_TONE_DEFEAT, on)
    }

    fn set_power(&mut self, on: bool) -> Result<(), Self::Error> {
        self.write_2323(if on {
            pt2323::MUTE_ALL_OFF
        } else {
            pt2323::MUTE_ALL_ON
        })
    }
}
