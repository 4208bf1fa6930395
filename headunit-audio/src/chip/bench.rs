//! Bench driver for the `Test` IC: binds a grid to every axis and never
//! touches the bus. Used to exercise the UI and persistence without
//! hardware.

use embedded_hal::i2c::I2c;

use crate::control::{AudioApi, Capabilities, Capability};
use crate::tune::{Grid, GridMap, TuneAxis};

static VOLUME: Grid = Grid::new(-79, 0, 8);
static TONE: Grid = Grid::new(-7, 7, 16);
static BALANCE: Grid = Grid::new(-7, 7, 8);
static LEVEL: Grid = Grid::new(-15, 0, 8);
static PREAMP: Grid = Grid::new(-47, 0, 8);
static GAIN: Grid = Grid::new(0, 15, 16);

/// Holds the bus idle so it can be handed back on release.
pub struct Bench<I2C> {
    bus: I2C,
}

impl<I2C> Bench<I2C>
where
    I2C: I2c,
{
    pub fn new(bus: I2C) -> Self {
        Self { bus }
    }

    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C> AudioApi for Bench<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE.with(Capability::Init)
    }

    fn init(&mut self, grids: &mut GridMap) -> Result<(), Self::Error> {
        grids.bind(TuneAxis::Volume, &VOLUME);
        grids.bind(TuneAxis::Bass, &TONE);
        grids.bind(TuneAxis::Middle, &TONE);
        grids.bind(TuneAxis::Treble, &TONE);
        grids.bind(TuneAxis::FrontRear, &BALANCE);
        grids.bind(TuneAxis::Balance, &BALANCE);
        grids.bind(TuneAxis::Center, &LEVEL);
        grids.bind(TuneAxis::Subwoofer, &LEVEL);
        grids.bind(TuneAxis::Preamp, &PREAMP);
        grids.bind(TuneAxis::Gain, &GAIN);
        Ok(())
    }
}
