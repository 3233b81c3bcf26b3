//! Basic full-line-win slot machine

use serde::{Deserialize, Serialize};

use crate::error::{SwError, SwResult};
use crate::random::SharedRandom;
use crate::spin::{Line, SlotMachine, SpinResult, WinPosition};
use crate::symbols::SymbolSet;

/// Configuration for [`FullLinesMachine`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullLinesConfig {
    /// Reel (column) count
    pub width: usize,
    /// Visible row count
    pub height: usize,
    /// Symbol alphabet drawn from
    pub symbols: SymbolSet,
}

/// Machine paying out full rows of identical symbols
///
/// Each spin draws `height` random lines of `width` symbols; a row whose
/// symbols are all equal wins across its full width.
pub struct FullLinesMachine {
    config: FullLinesConfig,
    random: SharedRandom,
}

impl FullLinesMachine {
    /// Create a machine; rejects degenerate grids
    pub fn new(config: FullLinesConfig, random: SharedRandom) -> SwResult<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(SwError::InvalidGrid(config.width, config.height));
        }
        Ok(Self { config, random })
    }

    pub fn config(&self) -> &FullLinesConfig {
        &self.config
    }

    fn random_line(&mut self) -> Line {
        let mut random = self.random.lock();
        (0..self.config.width)
            .map(|_| self.config.symbols.pick(&mut *random).clone())
            .collect()
    }
}

impl SlotMachine for FullLinesMachine {
    fn spin(&mut self) -> SpinResult {
        let mut lines = Vec::with_capacity(self.config.height);
        let mut wins = Vec::new();
        for y in 0..self.config.height {
            let line = self.random_line();
            if line.iter().all(|s| s == &line[0]) {
                wins.push((0..self.config.width).map(|x| WinPosition { x, y }).collect());
            }
            lines.push(line);
        }
        log::debug!("spin: {} lines, {} wins", lines.len(), wins.len());
        SpinResult { lines, wins }
    }
}
