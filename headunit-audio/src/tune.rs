//! Tunable audio axes and their quantization grids.
//!
//! Every control dimension of the audio path is a [`TuneAxis`]. Its current
//! value lives in a [`TuneItem`] together with a reference to the
//! [`Grid`] the active IC driver assigned to it. Grids are `'static`
//! constants owned by the driver modules; an axis without a grid is inert.
//!
//! ```text
//! Volume  Bass  Middle  Treble  FrontRear  Balance  Center  Subwoofer  Preamp  Gain
//!   0      1      2       3         4         5        6        7        8      9
//! ```

use core::ops::Index;

use crate::constants::STEP_MULT;

/// One control dimension, in power-on replay order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuneAxis {
    Volume = 0,
    Bass,
    Middle,
    Treble,
    FrontRear,
    Balance,
    Center,
    Subwoofer,
    Preamp,
    /// Input gain of the active input (see gain staging in [`crate::param`]).
    Gain,
}

impl TuneAxis {
    /// Number of axes (the sentinel bounding every per-axis table).
    pub const COUNT: usize = 10;

    /// All axes in enumeration order.
    pub const ALL: [TuneAxis; Self::COUNT] = [
        TuneAxis::Volume,
        TuneAxis::Bass,
        TuneAxis::Middle,
        TuneAxis::Treble,
        TuneAxis::FrontRear,
        TuneAxis::Balance,
        TuneAxis::Center,
        TuneAxis::Subwoofer,
        TuneAxis::Preamp,
        TuneAxis::Gain,
    ];

    /// Map a raw index to an axis. Indices at or past [`COUNT`](Self::COUNT)
    /// return `None`.
    pub const fn from_index(index: usize) -> Option<TuneAxis> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Position of this axis in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bass, middle and treble: the axes neutralised by tone bypass.
    pub const fn is_tone(self) -> bool {
        matches!(self, TuneAxis::Bass | TuneAxis::Middle | TuneAxis::Treble)
    }
}

/// Legal range and step size of one axis on one IC.
///
/// `step` is the step size in dB multiplied by [`STEP_MULT`]; it is only
/// used for formatting; clamping looks at `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grid {
    pub min: i8,
    pub max: i8,
    pub step: u8,
}

impl Grid {
    pub const fn new(min: i8, max: i8, step: u8) -> Self {
        Self { min, max, step }
    }

    /// Clamp `value` into `[min, max]`.
    pub const fn clamp(&self, value: i8) -> i8 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Convert a grid value to hundredths of a dB for display.
    ///
    /// ```
    /// use headunit_audio::tune::Grid;
    ///
    /// // 1.25 dB steps
    /// let grid = Grid::new(-63, 0, 10);
    /// assert_eq!(grid.to_centi_db(-3), -375);
    /// ```
    pub const fn to_centi_db(&self, value: i8) -> i32 {
        value as i32 * self.step as i32 * 100 / STEP_MULT as i32
    }
}

/// Stored value of one axis plus the grid it is quantized on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TuneItem {
    grid: Option<&'static Grid>,
    value: i8,
}

impl TuneItem {
    /// Grid bound by the active driver, `None` when the axis is inert.
    pub fn grid(&self) -> Option<&'static Grid> {
        self.grid
    }

    pub fn value(&self) -> i8 {
        self.value
    }

    pub fn is_bound(&self) -> bool {
        self.grid.is_some()
    }

    /// Clamp and store `value`. Returns the stored value, or `None` if the
    /// axis has no grid (the stored value is left untouched).
    pub(crate) fn set(&mut self, value: i8) -> Option<i8> {
        let grid = self.grid?;
        self.value = grid.clamp(value);
        Some(self.value)
    }

    /// Store without clamping. Used when loading persisted values before a
    /// driver has bound grids, and for the gain-staging mirror.
    pub(crate) fn set_raw(&mut self, value: i8) {
        self.value = value;
    }

    /// Replace the grid and pull the stored value into its range.
    fn rebind(&mut self, grid: Option<&'static Grid>) {
        self.grid = grid;
        if let Some(grid) = grid {
            self.value = grid.clamp(self.value);
        }
    }
}

/// The per-axis tune table, indexed by [`TuneAxis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TuneTable {
    items: [TuneItem; TuneAxis::COUNT],
}

impl TuneTable {
    pub const fn new() -> Self {
        Self {
            items: [TuneItem {
                grid: None,
                value: 0,
            }; TuneAxis::COUNT],
        }
    }

    /// Current value of `axis`.
    pub fn value(&self, axis: TuneAxis) -> i8 {
        self.items[axis.index()].value
    }

    pub fn iter(&self) -> impl Iterator<Item = (TuneAxis, &TuneItem)> + '_ {
        TuneAxis::ALL.into_iter().zip(self.items.iter())
    }

    pub(crate) fn item_mut(&mut self, axis: TuneAxis) -> &mut TuneItem {
        &mut self.items[axis.index()]
    }

    /// Install the grids a driver bound during `init`, replacing all
    /// previous bindings.
    pub(crate) fn install(&mut self, grids: &GridMap) {
        for axis in TuneAxis::ALL {
            self.items[axis.index()].rebind(grids.get(axis));
        }
    }
}

impl Index<TuneAxis> for TuneTable {
    type Output = TuneItem;

    fn index(&self, axis: TuneAxis) -> &TuneItem {
        &self.items[axis.index()]
    }
}

/// Grid assignments collected from a driver's `init` hook.
///
/// This is the only way a grid reaches a [`TuneItem`]: the processor hands
/// a fresh map to the driver and installs it afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridMap {
    grids: [Option<&'static Grid>; TuneAxis::COUNT],
}

impl GridMap {
    pub const fn new() -> Self {
        Self {
            grids: [None; TuneAxis::COUNT],
        }
    }

    /// Bind `grid` to `axis`.
    pub fn bind(&mut self, axis: TuneAxis, grid: &'static Grid) {
        self.grids[axis.index()] = Some(grid);
    }

    pub fn get(&self, axis: TuneAxis) -> Option<&'static Grid> {
        self.grids[axis.index()]
    }
}
