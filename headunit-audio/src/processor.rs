//! The audio processor: parameter state, driver dispatch and power
//! sequencing.
//!
//! [`Processor`] owns the [`AudioParam`] set, the [`Driver`] bound to the
//! configured IC and the [`SettingsStore`]. Every operation updates the
//! parameter set first and then forwards to the driver if it reports the
//! matching [`Capability`]. Bus errors are logged (with the `defmt`
//! feature) and otherwise ignored: the stored state is the source of truth
//! and is replayed on the next power-up.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► read_settings(default_ic) ──► init ──► operations ──► set_power(false)
//!                                         ▲
//!                       switch_ic ────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut audio = Processor::new(i2c, store);
//! audio.read_settings(AudioIc::Tda7439);
//! audio.init();
//! audio.set_power(true);
//! audio.change_tune(TuneAxis::Volume, 1);
//! ```

use embedded_hal::i2c::I2c;

use crate::chip::Driver;
use crate::constants::MAX_INPUTS;
use crate::control::{AudioApi, Capability};
use crate::flags::Flag;
use crate::ic::{AudioIc, AudioMode};
use crate::matrix::{compute_channel_gains, ChannelGains};
use crate::param::{AudioParam, InputType};
use crate::settings::SettingsStore;
use crate::tune::{GridMap, TuneAxis};

// ── Configuration ──────────────────────────────────────────────────────────

/// How mute interacts with power transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MutePolicy {
    /// Power sequencing never touches mute.
    #[default]
    Orthogonal,
    /// Mute before powering down, unmute when powering up.
    FollowPower,
}

/// Run-time options of a [`Processor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProcessorConfig {
    pub mute_policy: MutePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    #[default]
    Off,
    On,
}

// ── Processor ──────────────────────────────────────────────────────────────

/// Audio processor front end.
///
/// Exactly one of `driver` and `bus` holds the I²C bus: the driver when the
/// configured IC has one, the bare bus otherwise.
pub struct Processor<I2C, S> {
    par: AudioParam,
    driver: Option<Driver<I2C>>,
    bus: Option<I2C>,
    store: S,
    power: PowerState,
    config: ProcessorConfig,
}

impl<I2C, S> Processor<I2C, S>
where
    I2C: I2c,
    S: SettingsStore,
{
    /// Create an unbound processor with default parameters.
    pub fn new(bus: I2C, store: S) -> Self {
        Self::with_config(bus, store, ProcessorConfig::default())
    }

    pub fn with_config(bus: I2C, store: S, config: ProcessorConfig) -> Self {
        Self {
            par: AudioParam::new(),
            driver: None,
            bus: Some(bus),
            store,
            power: PowerState::Off,
            config,
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Load the parameter set from the store and bind the driver of the
    /// stored IC (`default_ic` if none was stored).
    pub fn read_settings(&mut self, default_ic: AudioIc) {
        self.par = AudioParam::load(&self.store, default_ic);
        self.bind(self.par.ic);
    }

    /// Let the bound driver assign grids, then pull every stored value into
    /// range.
    pub fn init(&mut self) {
        let mut grids = GridMap::new();
        self.forward(Capability::Init, |driver, _| driver.init(&mut grids));
        self.par.tune.install(&grids);

        let input = self.par.input as usize;
        let gain = self.par.gain[input];
        let gain_axis = self.par.tune.item_mut(TuneAxis::Gain);
        match gain_axis.set(gain) {
            Some(clamped) => self.par.gain[input] = clamped,
            None => gain_axis.set_raw(gain),
        }
    }

    /// Write the parameter set to the store.
    pub fn save_settings(&mut self) {
        self.par.save(&mut self.store);
    }

    /// Select another IC and re-initialize: the old driver is released,
    /// the new one runs its init sequence, grids are rebound and the input
    /// is re-validated. An active mute is carried over to the new chip; the
    /// rest of the parameter set reaches it on the next power-up.
    pub fn switch_ic(&mut self, ic: AudioIc) {
        #[cfg(feature = "defmt")]
        defmt::debug!("switch ic {} -> {}", self.par.ic, ic);

        self.par.ic = ic;
        self.bind(ic);
        if self.par.input >= ic.input_count() {
            self.par.input = 0;
        }
        self.init();
        if self.par.flags.mute {
            self.forward(Capability::SetMute, |driver, _| driver.set_mute(true));
        }
    }

    /// Consume the processor, returning the bus and the store.
    pub fn release(self) -> (Option<I2C>, S) {
        let bus = match self.driver {
            Some(driver) => Some(driver.release()),
            None => self.bus,
        };
        (bus, self.store)
    }

    fn bind(&mut self, ic: AudioIc) {
        let bus = match self.driver.take() {
            Some(driver) => Some(driver.release()),
            None => self.bus.take(),
        };
        let Some(bus) = bus else {
            return;
        };
        match Driver::bind(ic, bus) {
            Ok(driver) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("bound driver for {}", ic);
                self.driver = Some(driver);
            }
            Err(bus) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("no driver for {}, observe only", ic);
                self.bus = Some(bus);
            }
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn par(&self) -> &AudioParam {
        &self.par
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> ProcessorConfig {
        self.config
    }

    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// Whether a driver is bound for the selected IC.
    pub fn is_bound(&self) -> bool {
        self.driver.is_some()
    }

    pub fn input_count(&self) -> u8 {
        self.par.ic.input_count()
    }

    pub fn is_mode_supported(&self, mode: AudioMode) -> bool {
        self.par.is_mode_supported(mode)
    }

    /// Per-speaker gains for the current balance, fader, center and
    /// subwoofer settings.
    pub fn channel_gains(&self, base_volume: i8, rear_to_bass: bool) -> ChannelGains {
        compute_channel_gains(&self.par.tune, base_volume, rear_to_bass)
    }

    // ── Tune axes ──────────────────────────────────────────────────────

    /// Clamp `value` into the axis grid, store it and send it to the chip.
    ///
    /// Does nothing for an axis without a grid. Tone axes are sent as 0
    /// while bypass is on and the chip cannot bypass in hardware.
    pub fn set_tune(&mut self, axis: TuneAxis, value: i8) {
        let Some(value) = self.par.tune.item_mut(axis).set(value) else {
            return;
        };
        if axis == TuneAxis::Gain {
            self.par.gain[self.par.input as usize] = value;
        }

        let sent = if axis.is_tone() && self.par.flags.bypass && !self.supports(Capability::SetBypass) {
            0
        } else {
            value
        };
        self.forward(Capability::SetTune, |driver, par| driver.set_tune(par, axis, sent));
    }

    /// Step `axis` by `delta` grid units.
    pub fn change_tune(&mut self, axis: TuneAxis, delta: i8) {
        let value = self.par.tune.value(axis).saturating_add(delta);
        self.set_tune(axis, value);
    }

    /// [`set_tune`](Self::set_tune) by raw axis index. Ignored past the
    /// last axis.
    pub fn set_tune_index(&mut self, index: usize, value: i8) {
        match TuneAxis::from_index(index) {
            Some(axis) => self.set_tune(axis, value),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("tune index {} out of range", index);
            }
        }
    }

    /// [`change_tune`](Self::change_tune) by raw axis index. Ignored past
    /// the last axis.
    pub fn change_tune_index(&mut self, index: usize, delta: i8) {
        match TuneAxis::from_index(index) {
            Some(axis) => self.change_tune(axis, delta),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("tune index {} out of range", index);
            }
        }
    }

    // ── Input ──────────────────────────────────────────────────────────

    /// Select `input`, wrapping to 0 past the last input of the IC, and
    /// restore its gain.
    pub fn set_input(&mut self, input: u8) {
        let input = if input < self.input_count() { input } else { 0 };
        self.par.input = input;

        let gain = self.par.gain[input as usize];
        self.par.tune.item_mut(TuneAxis::Gain).set_raw(gain);

        self.forward(Capability::SetInput, |driver, _| driver.set_input(input));
        self.set_tune(TuneAxis::Gain, gain);
    }

    /// Label input `slot` with a source type. Slots past
    /// [`MAX_INPUTS`] are ignored.
    pub fn set_input_type(&mut self, slot: usize, ty: InputType) {
        if slot < MAX_INPUTS {
            self.par.input_types[slot] = ty;
        }
    }

    /// Set the speaker mode. Check [`is_mode_supported`](Self::is_mode_supported)
    /// first; this does not.
    pub fn set_mode(&mut self, mode: AudioMode) {
        self.par.mode = mode;
    }

    // ── Flags ──────────────────────────────────────────────────────────

    /// Set any flag through its dedicated setter.
    pub fn set_flag(&mut self, flag: Flag, on: bool) {
        match flag {
            Flag::Mute => self.set_mute(on),
            Flag::Loudness => self.set_loudness(on),
            Flag::Surround => self.set_surround(on),
            Flag::Effect3d => self.set_effect3d(on),
            Flag::Bypass => self.set_bypass(on),
        }
    }

    pub fn set_mute(&mut self, on: bool) {
        self.par.flags.set(Flag::Mute, on);
        self.forward(Capability::SetMute, |driver, _| driver.set_mute(on));
    }

    pub fn set_loudness(&mut self, on: bool) {
        self.par.flags.set(Flag::Loudness, on);
        self.forward(Capability::SetLoudness, |driver, _| driver.set_loudness(on));
    }

    pub fn set_surround(&mut self, on: bool) {
        self.par.flags.set(Flag::Surround, on);
        self.forward(Capability::SetSurround, |driver, _| driver.set_surround(on));
    }

    pub fn set_effect3d(&mut self, on: bool) {
        self.par.flags.set(Flag::Effect3d, on);
        self.forward(Capability::SetEffect3d, |driver, _| driver.set_effect3d(on));
    }

    /// Bypass the tone controls. Without hardware bypass the three tone
    /// axes are re-sent, as 0 while bypass is on.
    pub fn set_bypass(&mut self, on: bool) {
        self.par.flags.set(Flag::Bypass, on);
        if self.supports(Capability::SetBypass) {
            self.forward(Capability::SetBypass, |driver, _| driver.set_bypass(on));
        } else {
            for axis in [TuneAxis::Bass, TuneAxis::Middle, TuneAxis::Treble] {
                let value = self.par.tune.value(axis);
                self.set_tune(axis, value);
            }
        }
    }

    // ── Power ──────────────────────────────────────────────────────────

    /// Power transition.
    ///
    /// Off: the parameter set is saved. On: the input, the persisted flags
    /// (in [`Flag::PERSISTED`] order, bypass last) and then every axis in order are replayed to the chip. The
    /// driver's own power hook runs at the end in both directions.
    pub fn set_power(&mut self, on: bool) {
        #[cfg(feature = "defmt")]
        defmt::debug!("power {}", on);

        if self.config.mute_policy == MutePolicy::FollowPower {
            self.set_mute(!on);
        }

        if on {
            let input = self.par.input;
            self.set_input(input);

            let flags = self.par.flags;
            for flag in Flag::PERSISTED {
                self.set_flag(flag, flags.get(flag));
            }

            for axis in TuneAxis::ALL {
                let value = self.par.tune.value(axis);
                self.set_tune(axis, value);
            }
            self.power = PowerState::On;
        } else {
            self.save_settings();
            self.power = PowerState::Off;
        }

        self.forward(Capability::SetPower, |driver, _| driver.set_power(on));
    }

    // ── Dispatch ───────────────────────────────────────────────────────

    fn supports(&self, cap: Capability) -> bool {
        self.driver.as_ref().is_some_and(|driver| driver.supports(cap))
    }

    /// Run `op` on the driver if it implements `cap`.
    fn forward<F>(&mut self, cap: Capability, op: F)
    where
        F: FnOnce(&mut Driver<I2C>, &AudioParam) -> Result<(), I2C::Error>,
    {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        if !driver.supports(cap) {
            return;
        }
        if let Err(_err) = op(driver, &self.par) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "{} failed: {}",
                cap,
                embedded_hal::i2c::Error::kind(&_err)
            );
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MemoryStore, Param};
    use crate::testing::MockI2c;

    fn processor(ic: AudioIc) -> Processor<MockI2c, MemoryStore> {
        let mut p = Processor::new(MockI2c::new(), MemoryStore::new());
        p.read_settings(ic);
        p.init();
        p
    }

    fn bus(p: Processor<MockI2c, MemoryStore>) -> MockI2c {
        match p.release() {
            (Some(bus), _) => bus,
            (None, _) => panic!("bus lost"),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────

    #[test]
    fn starts_off_and_unbound() {
        let p = Processor::new(MockI2c::new(), MemoryStore::new());
        assert_eq!(p.power_state(), PowerState::Off);
        assert!(!p.is_bound());
        assert_eq!(p.par().ic(), AudioIc::None);
        assert_eq!(p.config().mute_policy, MutePolicy::Orthogonal);
    }

    #[test]
    fn read_settings_binds_stored_ic() {
        let mut store = MemoryStore::new();
        store.store(Param::AudioIc, AudioIc::Test.to_raw());
        let mut p = Processor::new(MockI2c::new(), store);
        p.read_settings(AudioIc::Tda7439);
        assert_eq!(p.par().ic(), AudioIc::Test);
        assert!(p.is_bound());
    }

    #[test]
    fn init_clamps_loaded_values() {
        let mut store = MemoryStore::new();
        store.store(Param::AudioIc, AudioIc::Test.to_raw());
        store.store(Param::AudioVolume, -100);
        store.store(Param::AudioBass, 12);
        store.store(Param::AudioInput, 1);
        store.store(Param::gain(1), 40);

        let mut p = Processor::new(MockI2c::new(), store);
        p.read_settings(AudioIc::None);
        p.init();

        assert_eq!(p.par().value(TuneAxis::Volume), -79);
        assert_eq!(p.par().value(TuneAxis::Bass), 7);
        assert_eq!(p.par().value(TuneAxis::Gain), 15);
        assert_eq!(p.par().gain(1), 15);
    }

    #[test]
    fn observe_only_without_driver() {
        let mut p = processor(AudioIc::Tda7719);
        assert!(!p.is_bound());
        // No grids: every axis is inert.
        p.set_tune(TuneAxis::Volume, -10);
        assert_eq!(p.par().value(TuneAxis::Volume), 0);
        // State-only operations still apply.
        p.set_input(5);
        p.set_loudness(true);
        p.set_mute(true);
        assert_eq!(p.par().input(), 5);
        assert!(p.par().flags().loudness);
        assert!(p.par().flags().mute);
        p.set_power(true);
        assert_eq!(p.power_state(), PowerState::On);
        assert_eq!(bus(p).count(), 0);
    }

    // ── Tune ──────────────────────────────────────────────────────────

    #[test]
    fn set_tune_clamps_into_grid() {
        let mut p = processor(AudioIc::Test);
        p.set_tune(TuneAxis::Volume, 10);
        assert_eq!(p.par().value(TuneAxis::Volume), 0);
        p.set_tune(TuneAxis::Volume, -100);
        assert_eq!(p.par().value(TuneAxis::Volume), -79);
        p.set_tune(TuneAxis::Treble, -3);
        assert_eq!(p.par().value(TuneAxis::Treble), -3);
    }

    #[cfg(feature = "tda731x")]
    #[test]
    fn unbound_axis_is_ignored() {
        let mut p = processor(AudioIc::Tda7313);
        p.set_tune(TuneAxis::Middle, 4);
        p.set_tune(TuneAxis::Preamp, -4);
        assert_eq!(p.par().value(TuneAxis::Middle), 0);
        assert_eq!(p.par().value(TuneAxis::Preamp), 0);
        assert_eq!(bus(p).count(), 0);
    }

    #[test]
    fn change_tune_saturates() {
        let mut p = processor(AudioIc::Test);
        p.change_tune(TuneAxis::Volume, -100);
        p.change_tune(TuneAxis::Volume, -100);
        assert_eq!(p.par().value(TuneAxis::Volume), -79);
        p.change_tune(TuneAxis::Volume, 3);
        assert_eq!(p.par().value(TuneAxis::Volume), -76);
        p.change_tune(TuneAxis::Bass, i8::MAX);
        p.change_tune(TuneAxis::Bass, i8::MAX);
        assert_eq!(p.par().value(TuneAxis::Bass), 7);
    }

    #[test]
    fn change_tune_stays_at_max() {
        let mut p = processor(AudioIc::Test);
        p.set_tune(TuneAxis::Volume, 0);
        p.change_tune(TuneAxis::Volume, 1);
        p.change_tune(TuneAxis::Volume, 1);
        assert_eq!(p.par().value(TuneAxis::Volume), 0);
    }

    #[cfg(feature = "tda731x")]
    #[test]
    fn change_tune_leaves_unbound_axis() {
        let mut store = MemoryStore::new();
        store.store(Param::AudioIc, AudioIc::Tda7313.to_raw());
        store.store(Param::AudioPreamp, -5);
        let mut p = Processor::new(MockI2c::new(), store);
        p.read_settings(AudioIc::None);
        p.init();

        p.change_tune(TuneAxis::Preamp, 1);
        p.change_tune(TuneAxis::Middle, -1);
        assert_eq!(p.par().value(TuneAxis::Preamp), -5);
        assert_eq!(p.par().value(TuneAxis::Middle), 0);
        assert_eq!(bus(p).count(), 0);
    }

    #[test]
    fn index_past_last_axis_is_ignored() {
        let mut p = processor(AudioIc::Test);
        let before = p.par().clone();
        p.set_tune_index(TuneAxis::COUNT, 3);
        p.change_tune_index(usize::MAX, 3);
        assert_eq!(*p.par(), before);

        p.set_tune_index(1, 3);
        p.change_tune_index(1, 1);
        assert_eq!(p.par().value(TuneAxis::Bass), 4);
    }

    // ── Gain staging ──────────────────────────────────────────────────

    #[test]
    fn gain_axis_mirrors_active_input() {
        let mut p = processor(AudioIc::Test);
        p.set_input(2);
        p.set_tune(TuneAxis::Gain, 6);
        assert_eq!(p.par().gain(2), 6);

        p.set_input(3);
        assert_eq!(p.par().value(TuneAxis::Gain), 0);
        p.change_tune(TuneAxis::Gain, 4);
        assert_eq!(p.par().gain(3), 4);

        p.set_input(2);
        assert_eq!(p.par().value(TuneAxis::Gain), 6);
        assert_eq!(p.par().gain(3), 4);
    }

    #[test]
    fn input_wraps_past_last() {
        let mut p = processor(AudioIc::Test);
        p.set_input(7);
        assert_eq!(p.par().input(), 7);
        p.set_input(8);
        assert_eq!(p.par().input(), 0);
    }

    #[test]
    fn input_type_slots() {
        let mut p = processor(AudioIc::Test);
        p.set_input_type(4, InputType::Dvd);
        p.set_input_type(MAX_INPUTS, InputType::Pc);
        assert_eq!(p.par().input_type(4), InputType::Dvd);
        assert_eq!(p.par().input_type(MAX_INPUTS), InputType::Tuner);
    }

    // ── Bypass ────────────────────────────────────────────────────────

    #[cfg(feature = "tda7439")]
    #[test]
    fn software_bypass_sends_neutral_tone() {
        use crate::chip::registers::tda7439 as reg;

        let mut p = processor(AudioIc::Tda7439);
        p.set_tune(TuneAxis::Bass, 5);
        p.set_bypass(true);
        assert_eq!(p.par().value(TuneAxis::Bass), 5);

        // While bypassed, new tone values are stored but sent as neutral.
        p.set_tune(TuneAxis::Treble, -4);
        assert_eq!(p.par().value(TuneAxis::Treble), -4);

        let b = bus(p);
        assert_eq!(b.last_reg(reg::I2C_ADDR, reg::BASS), Some(0x7));
        assert_eq!(b.last_reg(reg::I2C_ADDR, reg::TREBLE), Some(0x7));
    }

    #[cfg(feature = "tda7439")]
    #[test]
    fn software_bypass_off_restores_tone() {
        use crate::chip::registers::tda7439 as reg;

        let mut p = processor(AudioIc::Tda7439);
        p.set_tune(TuneAxis::Bass, 5);
        p.set_bypass(true);
        p.set_bypass(false);
        assert_eq!(bus(p).last_reg(reg::I2C_ADDR, reg::BASS), Some(0xA));
    }

    #[cfg(feature = "pt232x")]
    #[test]
    fn hardware_bypass_keeps_tone_values() {
        use crate::chip::registers::pt2322;

        let mut p = processor(AudioIc::Pt232x);
        p.set_bypass(true);
        p.set_tune(TuneAxis::Bass, 3);
        let b = bus(p);
        assert_eq!(b.last_cmd(pt2322::I2C_ADDR, pt2322::BASS), Some(0x9C));
        assert_eq!(
            b.last_cmd(pt2322::I2C_ADDR, pt2322::FUNCTION),
            Some(pt2322::FUNCTION | pt2322::FUNC_3D_OFF | pt2322::FUNC_TONE_DEFEAT)
        );
    }

    // ── Power ─────────────────────────────────────────────────────────

    #[test]
    fn power_off_saves_settings() {
        let mut p = processor(AudioIc::Test);
        p.set_tune(TuneAxis::Volume, -30);
        p.set_loudness(true);
        p.set_mute(true);
        p.set_power(false);

        assert_eq!(p.power_state(), PowerState::Off);
        assert_eq!(p.store().get(Param::AudioVolume), Some(-30));
        assert_eq!(p.store().get(Param::AudioFlags), Some(crate::flags::Flag::Loudness.bit() as i16));
        // Orthogonal policy: mute untouched.
        assert!(p.par().flags().mute);
    }

    #[test]
    fn follow_power_policy_toggles_mute() {
        let config = ProcessorConfig {
            mute_policy: MutePolicy::FollowPower,
        };
        let mut p = Processor::with_config(MockI2c::new(), MemoryStore::new(), config);
        p.read_settings(AudioIc::Test);
        p.init();

        p.set_power(true);
        assert!(!p.par().flags().mute);
        assert_eq!(p.power_state(), PowerState::On);
        p.set_power(false);
        assert!(p.par().flags().mute);
        assert_eq!(p.power_state(), PowerState::Off);
    }

    #[test]
    fn power_on_keeps_state() {
        let mut p = processor(AudioIc::Test);
        p.set_tune(TuneAxis::Balance, -2);
        p.set_surround(true);
        p.set_input(4);
        let before = p.par().clone();
        p.set_power(true);
        assert_eq!(*p.par(), before);
    }

    #[cfg(feature = "pt232x")]
    #[test]
    fn driver_power_hook_runs_last() {
        use crate::chip::registers::pt2323;

        let mut p = processor(AudioIc::Pt232x);
        p.set_power(true);
        let b = bus(p);
        let last = b.writes()[b.count() - 1];
        assert_eq!((last.addr, last.bytes[0]), (pt2323::I2C_ADDR, pt2323::MUTE_ALL_OFF));
    }

    // ── IC switching ──────────────────────────────────────────────────

    #[cfg(feature = "tda731x")]
    #[test]
    fn switch_ic_rebinds_and_revalidates() {
        let mut p = processor(AudioIc::Test);
        p.set_input(6);
        p.set_tune(TuneAxis::Volume, -79);
        p.set_tune(TuneAxis::Preamp, -20);

        p.switch_ic(AudioIc::Tda7313);
        assert_eq!(p.par().ic(), AudioIc::Tda7313);
        assert_eq!(p.par().input(), 0);
        assert_eq!(p.par().value(TuneAxis::Volume), -63);
        assert!(!p.par().tune()[TuneAxis::Preamp].is_bound());
        assert!(p.is_bound());

        p.switch_ic(AudioIc::Tda7418);
        assert!(!p.is_bound());
        assert!(!p.par().tune()[TuneAxis::Volume].is_bound());
        // Bus survives the round trip.
        assert_eq!(bus(p).count(), 0);
    }

    #[cfg(feature = "tda7439")]
    #[test]
    fn switch_ic_keeps_new_chip_muted() {
        use crate::chip::registers::tda7439 as reg;

        let mut p = processor(AudioIc::Test);
        p.set_mute(true);
        p.switch_ic(AudioIc::Tda7439);
        p.set_power(true);
        p.set_tune(TuneAxis::Volume, -10);

        assert!(p.par().flags().mute);
        let bus = bus(p);
        assert_eq!(bus.last_reg(reg::I2C_ADDR, reg::SPEAKER_LEFT), Some(reg::SP_MUTE));
        assert_eq!(bus.last_reg(reg::I2C_ADDR, reg::SPEAKER_RIGHT), Some(reg::SP_MUTE));
    }

    #[test]
    fn set_flag_dispatches_to_setter() {
        let mut p = processor(AudioIc::Test);
        for flag in [Flag::Mute, Flag::Loudness, Flag::Surround, Flag::Effect3d, Flag::Bypass] {
            p.set_flag(flag, true);
            assert!(p.par().flags().get(flag));
        }
        p.set_flag(Flag::Loudness, false);
        assert!(!p.par().flags().loudness);
    }

    // ── Modes and matrix ──────────────────────────────────────────────

    #[test]
    fn mode_support_follows_ic() {
        let mut p = processor(AudioIc::Test);
        assert!(p.is_mode_supported(AudioMode::Stereo));
        assert!(!p.is_mode_supported(AudioMode::Mode5_1));
        p.set_mode(AudioMode::Mode4_1);
        assert_eq!(p.par().mode(), AudioMode::Mode4_1);
    }

    #[test]
    fn channel_gains_use_stored_axes() {
        let mut p = processor(AudioIc::Test);
        p.set_tune(TuneAxis::Balance, 3);
        p.set_tune(TuneAxis::Center, 2);
        p.set_tune(TuneAxis::Subwoofer, -4);
        // Center grid tops out at 0.
        let g = p.channel_gains(0, true);
        assert_eq!(g.front_left, -3);
        assert_eq!(g.rear_left, -4);
        assert_eq!(g.rear_right, -4);
        assert_eq!(g.center, 0);
    }
}
