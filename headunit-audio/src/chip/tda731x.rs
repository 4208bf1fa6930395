//! TDA7313 four-speaker processor.
//!
//! Volume is a single 1.25 dB master attenuator; the four speaker
//! attenuators carry balance and fader. In 2.1 mode the rear pair is fed
//! from the subwoofer level instead (see [`crate::matrix`]).

use embedded_hal::i2c::I2c;

use super::registers::tda7313 as reg;
use super::{attenuation, tone_code};
use crate::control::{AudioApi, Capabilities, Capability};
use crate::ic::AudioMode;
use crate::matrix::compute_channel_gains;
use crate::param::AudioParam;
use crate::tune::{Grid, GridMap, TuneAxis};

static VOLUME: Grid = Grid::new(-63, 0, 10);
static TONE: Grid = Grid::new(-7, 7, 16);
static BALANCE: Grid = Grid::new(-7, 7, 10);
static SUBWOOFER: Grid = Grid::new(-15, 0, 10);
static GAIN: Grid = Grid::new(0, 3, 30);

const CAPS: Capabilities = Capabilities::NONE
    .with(Capability::Init)
    .with(Capability::SetTune)
    .with(Capability::SetInput)
    .with(Capability::SetMute)
    .with(Capability::SetLoudness);

const SPEAKERS: [u8; 4] = [
    reg::SP_FRONT_LEFT,
    reg::SP_FRONT_RIGHT,
    reg::SP_REAR_LEFT,
    reg::SP_REAR_RIGHT,
];

/// TDA7313 driver.
///
/// The chip has no sub-addresses: every byte carries its own function code
/// in the high bits, so each write is a single byte.
pub struct Tda731x<I2C> {
    i2c: I2C,
    address: u8,
    /// Audio switch fields, merged into one byte on every change.
    input: u8,
    gain: u8,
    loudness: bool,
    /// Last computed speaker attenuation (FL, FR, RL, RR).
    speaker: [u8; 4],
    muted: bool,
}

impl<I2C> Tda731x<I2C>
where
    I2C: I2c,
{
    pub const DEFAULT_ADDRESS: u8 = reg::I2C_ADDR;

    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, Self::DEFAULT_ADDRESS)
    }

    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            input: 0,
            gain: 0,
            loudness: false,
            speaker: [reg::SP_MUTE; 4],
            muted: false,
        }
    }

    /// Send one command byte.
    pub fn write_command(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[command])
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_switch(&mut self) -> Result<(), I2C::Error> {
        let mut byte = reg::SWITCH | ((3 - self.gain) << reg::SWITCH_GAIN_SHIFT) | self.input;
        if !self.loudness {
            byte |= reg::SWITCH_LOUDNESS_OFF;
        }
        self.write_command(byte)
    }

    fn write_speakers(&mut self) -> Result<(), I2C::Error> {
        for (i, base) in SPEAKERS.into_iter().enumerate() {
            let att = if self.muted { reg::SP_MUTE } else { self.speaker[i] };
            self.write_command(base | att)?;
        }
        Ok(())
    }

    fn set_speakers(&mut self, par: &AudioParam) -> Result<(), I2C::Error> {
        let rear_to_bass = par.mode() == AudioMode::Mode2_1;
        let gains = compute_channel_gains(par.tune(), 0, rear_to_bass);
        self.speaker = [
            attenuation(gains.front_left, reg::SP_MUTE),
            attenuation(gains.front_right, reg::SP_MUTE),
            attenuation(gains.rear_left, reg::SP_MUTE),
            attenuation(gains.rear_right, reg::SP_MUTE),
        ];
        if self.muted {
            return Ok(());
        }
        self.write_speakers()
    }
}

impl<I2C> AudioApi for Tda731x<I2C>
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
        grids.bind(TuneAxis::Treble, &TONE);
        grids.bind(TuneAxis::FrontRear, &BALANCE);
        grids.bind(TuneAxis::Balance, &BALANCE);
        grids.bind(TuneAxis::Subwoofer, &SUBWOOFER);
        grids.bind(TuneAxis::Gain, &GAIN);
        Ok(())
    }

    fn set_tune(&mut self, par: &AudioParam, axis: TuneAxis, value: i8) -> Result<(), Self::Error> {
        match axis {
            TuneAxis::Volume => {
                let code = attenuation(value as i16, 63) & 0x3F;
                self.write_command(reg::VOLUME | code)
            }
            TuneAxis::Bass => self.write_command(reg::BASS | tone_code(value)),
            TuneAxis::Treble => self.write_command(reg::TREBLE | tone_code(value)),
            TuneAxis::FrontRear | TuneAxis::Balance | TuneAxis::Subwoofer => self.set_speakers(par),
            TuneAxis::Gain => {
                self.gain = value.clamp(0, 3) as u8;
                self.write_switch()
            }
            _ => Ok(()),
        }
    }

    fn set_input(&mut self, input: u8) -> Result<(), Self::Error> {
        self.input = input.min(reg::IN_CNT - 1);
        self.write_switch()
    }

    fn set_mute(&mut self, on: bool) -> Result<(), Self::Error> {
        self.muted = on;
        self.write_speakers()
    }

    fn set_loudness(&mut self, on: bool) -> Result<(), Self::Error> {
        self.loudness = on;
        self.write_switch()
    }
}
