/// Number of input slots the parameter set remembers gain and source type for.
pub const MAX_INPUTS: usize = 8;

/// Fixed-point multiplier for grid step sizes (`step = dB × STEP_MULT`).
pub const STEP_MULT: u8 = 8;
