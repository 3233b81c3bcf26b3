//! Spin results and grid shapes

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// One visible row of symbols across all reels
pub type Line = Vec<Symbol>;

/// Grid coordinate of one cell in a winning run
///
/// `x` is the reel (column) index, `y` the row index within the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinPosition {
    pub x: usize,
    pub y: usize,
}

/// Ordered run of grid coordinates forming one win
pub type WinLine = Vec<WinPosition>;

/// Complete outcome of one spin, immutable once produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Visible rows, top to bottom
    pub lines: Vec<Line>,
    /// Winning runs, if any
    pub wins: Vec<WinLine>,
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReelsSize {
    /// Reel (column) count
    pub reels: usize,
    /// Visible row count
    pub rows: usize,
}

/// Spin source, produces the authoritative end state of each spin
pub trait SlotMachine: Send {
    fn spin(&mut self) -> SpinResult;
}
