//! # headunit-audio
//!
//! A `no_std`, allocation-free audio parameter engine for car-audio head
//! units. It drives one of several interchangeable audio processor ICs
//! over I²C through a single tuning surface, and persists user settings
//! across power cycles.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Model | [`tune`] | Tune axes, quantization grids, per-axis table |
//! | Model | [`flags`] / [`ic`] | Feature flags, IC identifiers, mode table |
//! | Model | [`param`] | Full parameter set with save/load |
//! | Math | [`matrix`] | Balance/fader/center/subwoofer channel gains |
//! | Trait | [`control`] | `AudioApi` capability interface |
//! | Drivers | [`chip`] | TDA7439/7440, TDA7313, PT2322+PT2323 (feature-gated) |
//! | Storage | [`settings`] | Key layout and `SettingsStore` trait |
//! | Engine | [`processor`] | Clamping, dispatch, power sequencing |
//!
//! ## Quick start
//!
//! ```ignore
//! use headunit_audio::ic::AudioIc;
//! use headunit_audio::processor::Processor;
//! use headunit_audio::settings::MemoryStore;
//! use headunit_audio::tune::TuneAxis;
//!
//! let mut audio = Processor::new(i2c, MemoryStore::new());
//! audio.read_settings(AudioIc::Tda7439);
//! audio.init();
//! audio.set_power(true);
//!
//! // From the remote control handler:
//! audio.change_tune(TuneAxis::Volume, 1);
//! audio.set_input(2);
//!
//! // On ignition off:
//! audio.set_power(false);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `tda7439` | yes | TDA7439 / TDA7440 driver |
//! | `tda731x` | yes | TDA7313 driver |
//! | `pt232x` | yes | PT2322 + PT2323 driver |
//! | `defmt` | no | `defmt::Format` derives and logging |
//!
//! ## Audio parameters
//!
//! - **Inputs:** up to 8 ([`constants::MAX_INPUTS`])
//! - **Grid step unit:** 1/8 dB ([`constants::STEP_MULT`])
//! - **Axes:** 10, in power-on replay order ([`tune::TuneAxis::ALL`])

#![no_std]

pub mod constants;
pub mod tune;
pub mod flags;
pub mod ic;
pub mod settings;
pub mod param;
pub mod matrix;
pub mod control;
pub mod chip;
pub mod processor;

#[cfg(test)]
mod testing;


pub use control::{AudioApi, Capabilities, Capability};
pub use ic::{AudioIc, AudioMode};
pub use param::AudioParam;
pub use processor::{MutePolicy, Processor, ProcessorConfig};
pub use settings::{MemoryStore, SettingsStore};
pub use tune::{Grid, TuneAxis};
