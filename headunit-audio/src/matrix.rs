//! Per-speaker gain matrix from balance, fader, center and subwoofer axes.
//!
//! Balance and fader attenuate one side of a pair and leave the other side
//! at the base level:
//!
//! ```text
//! balance > 0  → left channels pulled down by `balance`
//! balance ≤ 0  → right channels pulled down by `-balance`
//! fader   > 0  → rear channels pulled down by `fader`
//! fader   ≤ 0  → front channels pulled down by `-fader`
//! ```
//!
//! With rear-to-bass redirection the rear pair carries the subwoofer level
//! instead of the fader and balance.

use crate::tune::{TuneAxis, TuneTable};

/// Raw per-channel gain offsets, in grid units.
///
/// Not clamped: each driver saturates when encoding its registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelGains {
    pub front_left: i16,
    pub front_right: i16,
    pub rear_left: i16,
    pub rear_right: i16,
    pub center: i16,
    pub subwoofer: i16,
}

/// Compute the six channel gains from `tune`, starting every channel at
/// `base_volume`.
///
/// # Example
/// ```
/// use headunit_audio::matrix::compute_channel_gains;
/// use headunit_audio::tune::TuneTable;
///
/// let gains = compute_channel_gains(&TuneTable::new(), -20, false);
/// assert_eq!(gains.front_left, -20);
/// assert_eq!(gains.subwoofer, -20);
/// ```
pub fn compute_channel_gains(tune: &TuneTable, base_volume: i8, rear_to_bass: bool) -> ChannelGains {
    let base = base_volume as i16;
    let balance = tune.value(TuneAxis::Balance) as i16;
    let front_rear = tune.value(TuneAxis::FrontRear) as i16;
    let center = tune.value(TuneAxis::Center) as i16;
    let subwoofer = tune.value(TuneAxis::Subwoofer) as i16;

    let mut raw = ChannelGains {
        front_left: base,
        front_right: base,
        rear_left: base,
        rear_right: base,
        center: base,
        subwoofer: base,
    };

    if balance > 0 {
        raw.front_left -= balance;
        if !rear_to_bass {
            raw.rear_left -= balance;
        }
    } else {
        raw.front_right += balance;
        if !rear_to_bass {
            raw.rear_right += balance;
        }
    }

    if rear_to_bass {
        raw.rear_left += subwoofer;
        raw.rear_right += subwoofer;
    } else if front_rear > 0 {
        raw.rear_left -= front_rear;
        raw.rear_right -= front_rear;
    } else {
        raw.front_left += front_rear;
        raw.front_right += front_rear;
    }

    raw.center += center;
    raw.subwoofer += subwoofer;

    raw
}
