//! Slot reels model

use parking_lot::Mutex;

use sw_core::{Line, Observable, ReelsSize, SharedRandom, SlotMachine, SymbolSet, WinLine};

/// Visible rows, top to bottom
pub type Lines = Vec<Line>;

/// Winning runs of the latest spin
pub type Wins = Vec<WinLine>;

/// Observable model of the reel grid
///
/// Publishes the grid dimensions, the visible lines, and the winning runs.
/// `spin` asks the machine for the authoritative end state and publishes
/// `lines` before `wins`: the animation layer reacts to `lines`, the title
/// layer to `wins`, and that order lets the title layer await a spin that is
/// already in flight.
pub struct SlotReelsModel {
    lines: Observable<Lines>,
    wins: Observable<Wins>,
    reels_size: Observable<ReelsSize>,
    machine: Mutex<Box<dyn SlotMachine>>,
}

impl SlotReelsModel {
    /// Create the model; the initial grid is filled with random symbols
    pub fn new(
        symbols: &SymbolSet,
        reels: usize,
        rows: usize,
        machine: Box<dyn SlotMachine>,
        random: &SharedRandom,
    ) -> Self {
        let initial_lines = {
            let mut random = random.lock();
            (0..rows)
                .map(|_| {
                    (0..reels)
                        .map(|_| symbols.pick(&mut *random).clone())
                        .collect()
                })
                .collect()
        };
        Self {
            lines: Observable::new(initial_lines),
            wins: Observable::new(Vec::new()),
            reels_size: Observable::new(ReelsSize { reels, rows }),
            machine: Mutex::new(machine),
        }
    }

    /// Run one spin and publish its outcome
    pub fn spin(&self) {
        let result = self.machine.lock().spin();
        log::debug!(
            "model spin: {} lines, {} wins",
            result.lines.len(),
            result.wins.len()
        );
        self.lines.set(result.lines);
        self.wins.set(result.wins);
    }

    pub fn lines(&self) -> Observable<Lines> {
        self.lines.clone()
    }

    pub fn wins(&self) -> Observable<Wins> {
        self.wins.clone()
    }

    pub fn reels_size(&self) -> Observable<ReelsSize> {
        self.reels_size.clone()
    }
}
