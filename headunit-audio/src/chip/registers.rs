//! Register addresses and command bytes of the supported processors.
//!
//! All addresses are 7-bit I²C addresses. TDA7439 and TDA7313 use
//! sub-address/value pairs; the PT2322/PT2323 take single command bytes
//! with the data in the low nibble.

// ── TDA7439 / TDA7440 ──────────────────────────────────────────────────────

pub mod tda7439 {
    pub const I2C_ADDR: u8 = 0x44;

    /// Input selector. 0 = IN4 .. 3 = IN1 (reverse order).
    pub const INPUT_SELECT: u8 = 0x00;
    /// Input gain, 0..15 in 2 dB steps.
    pub const INPUT_GAIN: u8 = 0x01;
    /// Preamp volume, 0..47 dB attenuation in 1 dB steps.
    pub const VOLUME: u8 = 0x02;
    /// Tone registers, 4-bit code (see `tone_code`).
    pub const BASS: u8 = 0x03;
    pub const MIDDLE: u8 = 0x04;
    pub const TREBLE: u8 = 0x05;
    /// Speaker attenuators, 0..79 dB in 1 dB steps.
    pub const SPEAKER_RIGHT: u8 = 0x06;
    pub const SPEAKER_LEFT: u8 = 0x07;

    /// Largest speaker attenuation code.
    pub const SP_MAX_ATT: u8 = 79;
    /// Speaker attenuator mute code.
    pub const SP_MUTE: u8 = 0x78;

    pub const IN_CNT: u8 = 4;
}

// ── TDA7313 ────────────────────────────────────────────────────────────────

pub mod tda7313 {
    pub const I2C_ADDR: u8 = 0x44;

    /// Volume: `0b00vv_vvvv`, 0..63 × 1.25 dB attenuation.
    pub const VOLUME: u8 = 0x00;
    /// Speaker attenuators: `0bxxx_aaaaa`, 0..31 × 1.25 dB, 31 = mute.
    pub const SP_FRONT_LEFT: u8 = 0x80;
    pub const SP_FRONT_RIGHT: u8 = 0xA0;
    pub const SP_REAR_LEFT: u8 = 0xC0;
    pub const SP_REAR_RIGHT: u8 = 0xE0;
    pub const SP_MUTE: u8 = 0x1F;

    /// Audio switch: `0b010_gg_l_ss`.
    /// - Bits 4:3 — input gain (0b11 = 0 dB .. 0b00 = +11.25 dB)
    /// - Bit  2   — loudness off
    /// - Bits 1:0 — input
    pub const SWITCH: u8 = 0x40;
    pub const SWITCH_LOUDNESS_OFF: u8 = 0x04;
    pub const SWITCH_GAIN_SHIFT: u8 = 3;

    pub const BASS: u8 = 0x60;
    pub const TREBLE: u8 = 0x70;

    pub const IN_CNT: u8 = 3;
}

// ── PT2322 (6-channel volume/tone) ─────────────────────────────────────────

pub mod pt2322 {
    pub const I2C_ADDR: u8 = 0x44;

    /// Activate the input path; must follow a clear.
    pub const INPUT_SW: u8 = 0xC7;
    pub const CLEAR: u8 = 0xFF;

    /// Channel trims, low nibble 0..15 dB attenuation.
    pub const TRIM_FRONT_LEFT: u8 = 0x10;
    pub const TRIM_FRONT_RIGHT: u8 = 0x20;
    pub const TRIM_CENTER: u8 = 0x30;
    pub const TRIM_REAR_LEFT: u8 = 0x40;
    pub const TRIM_REAR_RIGHT: u8 = 0x50;
    pub const TRIM_SUBWOOFER: u8 = 0x60;
    pub const TRIM_MAX: u8 = 15;

    /// Function select.
    /// - Bit 3 — mute
    /// - Bit 2 — 3D off
    /// - Bit 1 — tone defeat
    pub const FUNCTION: u8 = 0x70;
    pub const FUNC_MUTE: u8 = 0x08;
    pub const FUNC_3D_OFF: u8 = 0x04;
    pub const FUNC_TONE_DEFEAT: u8 = 0x02;

    pub const BASS: u8 = 0x90;
    pub const MIDDLE: u8 = 0xA0;
    pub const TREBLE: u8 = 0xB0;

    /// Master volume, split into 1 dB and 10 dB digits (0..79 dB).
    pub const VOL_1DB: u8 = 0xD0;
    pub const VOL_10DB: u8 = 0xE0;
    pub const VOL_MAX_ATT: u8 = 79;
}

// ── PT2323 (input switch) ──────────────────────────────────────────────────

pub mod pt2323 {
    pub const I2C_ADDR: u8 = 0x4A;

    /// Input codes: stereo 1..4, then the 6-channel input.
    pub const INPUTS: [u8; 5] = [0xCB, 0xCA, 0xC9, 0xC8, 0xC7];

    pub const SURROUND_ON: u8 = 0xD0;
    pub const SURROUND_OFF: u8 = 0xD1;

    pub const MUTE_ALL_ON: u8 = 0xFF;
    pub const MUTE_ALL_OFF: u8 = 0xFE;
}
