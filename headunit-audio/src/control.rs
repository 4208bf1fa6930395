use crate::param::AudioParam;
use crate::tune::{GridMap, TuneAxis};

/// One hardware operation an IC driver may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    Init,
    SetTune,
    SetInput,
    SetMute,
    SetLoudness,
    SetSurround,
    SetEffect3d,
    SetBypass,
    SetPower,
}

impl Capability {
    const fn mask(self) -> u16 {
        1 << self as u16
    }
}

/// Set of [`Capability`] values a driver supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities(u16);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);

    /// Builder-style union, usable in `const` items.
    pub const fn with(self, cap: Capability) -> Self {
        Capabilities(self.0 | cap.mask())
    }

    pub const fn contains(self, cap: Capability) -> bool {
        self.0 & cap.mask() != 0
    }
}

/// Hardware interface of an audio processor IC driver.
///
/// Every operation has a default no-op body; [`capabilities`](Self::capabilities)
/// is the authoritative answer to which ones a chip actually implements. The
/// processor only calls an operation the driver reports, and falls back to
/// state-only behavior (or software emulation, for bypass) otherwise.
pub trait AudioApi {
    /// Error type for bus operations.
    type Error;

    /// Operations this driver implements.
    fn capabilities(&self) -> Capabilities;

    fn supports(&self, cap: Capability) -> bool {
        self.capabilities().contains(cap)
    }

    /// Bind a grid to every axis the chip supports; axes left unbound are
    /// inert.
    fn init(&mut self, grids: &mut GridMap) -> Result<(), Self::Error> {
        let _ = grids;
        Ok(())
    }

    /// Send `value` for `axis`. `par` already holds the new stored state;
    /// `value` can differ from it for tone axes under software bypass.
    fn set_tune(&mut self, par: &AudioParam, axis: TuneAxis, value: i8) -> Result<(), Self::Error> {
        let _ = (par, axis, value);
        Ok(())
    }

    fn set_input(&mut self, input: u8) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }

    fn set_mute(&mut self, on: bool) -> Result<(), Self::Error> {
        let _ = on;
        Ok(())
    }

    fn set_loudness(&mut self, on: bool) -> Result<(), Self::Error> {
        let _ = on;
        Ok(())
    }

    fn set_surround(&mut self, on: bool) -> Result<(), Self::Error> {
        let _ = on;
        Ok(())
    }

    fn set_effect3d(&mut self, on: bool) -> Result<(), Self::Error> {
        let _ = on;
        Ok(())
    }

    fn set_bypass(&mut self, on: bool) -> Result<(), Self::Error> {
        let _ = on;
        Ok(())
    }

    /// Chip-level power hook, called after the parameter replay on power-up
    /// and after the settings flush on power-down.
    fn set_power(&mut self, on: bool) -> Result<(), Self::Error> {
        let _ = on;
        Ok(())
    }
}
