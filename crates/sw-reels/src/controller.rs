//! Reel spin controller
//!
//! Drives a full spin across all reels: staggered per-reel position tweens
//! (later reels travel farther and finish later), continuous symbol-strip
//! updates with wrap-boundary symbol swaps, motion-blur intensity while a
//! reel is moving, and a gate that resolves once every reel has settled.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use sw_core::{SharedRandom, Subscriber, SwError, SwResult, SymbolSet};
use sw_tween::{CompletionHandle, Easing, FieldValues, TweenOptions, TweenScheduler, Value, single_field};

use crate::gate::SpinGate;
use crate::model::Lines;
use crate::reel::{Reel, ReelSlot};
use crate::viewmodel::SlotReelsViewModel;

/// Fraction of a grid cell a symbol occupies
const SYMBOL_FILL: f64 = 0.8;

/// Overshoot amount of the reel-stop easing
const REEL_STOP_OVERSHOOT: f64 = 0.2;

/// Divisor turning position speed into blur intensity
const BLUR_TIME_SCALE: f64 = 10.0;

/// Spin animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelSpinOptions {
    /// Layout width of the reel area
    pub width: f64,
    /// Layout height of the reel area
    pub height: f64,
    /// Duration of the whole spin in seconds; the last reel runs exactly
    /// this long
    pub spin_duration: f64,
    /// Steps every reel travels
    pub base_spin_steps: u32,
    /// Additional steps per reel index, staggering the stops
    pub extra_spin_steps: u32,
}

impl ReelSpinOptions {
    pub fn validate(&self) -> SwResult<()> {
        if !(self.spin_duration > 0.0) || !self.spin_duration.is_finite() {
            return Err(SwError::InvalidConfig(format!(
                "spin_duration must be positive, got {}",
                self.spin_duration
            )));
        }
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(SwError::InvalidConfig(format!(
                "layout must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for ReelSpinOptions {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
            spin_duration: 3.5,
            base_spin_steps: 100,
            extra_spin_steps: 100,
        }
    }
}

/// Travel and duration of one reel within a spin
///
/// All reels share one step speed, so a reel owed fewer steps finishes
/// earlier by exactly the time its missing steps would have taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    /// Steps this reel travels past its current position
    pub steps: f64,
    /// Seconds this reel spins
    pub duration: f64,
}

impl SpinPlan {
    pub fn for_reel(reel_index: usize, reel_count: usize, options: &ReelSpinOptions) -> Self {
        let extra_per_reel = options.extra_spin_steps as f64;
        let max_extra = reel_count.saturating_sub(1) as f64 * extra_per_reel;
        let max_steps = options.base_spin_steps as f64 + max_extra;
        let speed = max_steps / options.spin_duration;

        let extra = extra_per_reel * reel_index as f64;
        // A zero-travel spin has no speed to trade; keep the full duration
        let duration = if speed > 0.0 {
            options.spin_duration - (max_extra - extra) / speed
        } else {
            options.spin_duration
        };
        Self {
            steps: options.base_spin_steps as f64 + extra,
            duration,
        }
    }
}

struct ReelSetState {
    reels: Vec<Arc<Mutex<Reel>>>,
    symbol_size: f64,
    rows: usize,
    awaiting_first_lines: bool,
}

/// Animation controller for the reel grid
///
/// Subscribes to the view-model: size changes rebuild the reel set, the
/// first published lines seed the visible grid, and every later value
/// starts a spin that settles on exactly those lines.
pub struct ReelSpinController {
    state: Arc<Mutex<ReelSetState>>,
    gate: SpinGate,
    #[allow(dead_code)]
    subscriber: Subscriber,
}

impl ReelSpinController {
    pub fn new(
        vm: &SlotReelsViewModel,
        tweens: TweenScheduler,
        symbols: SymbolSet,
        options: ReelSpinOptions,
        random: SharedRandom,
    ) -> SwResult<Self> {
        options.validate()?;

        let state = Arc::new(Mutex::new(ReelSetState {
            reels: Vec::new(),
            symbol_size: 0.0,
            rows: 0,
            awaiting_first_lines: true,
        }));
        let gate = SpinGate::new();
        let mut subscriber = Subscriber::new();

        {
            let state = state.clone();
            let options = options.clone();
            subscriber.subscribe(&vm.reels_size(), move |size| {
                rebuild_reels(&state, size.reels, size.rows, &options);
            });
        }
        {
            let state = state.clone();
            let gate = gate.clone();
            subscriber.subscribe(&vm.lines(), move |lines: &Lines| {
                let first = {
                    let mut state = state.lock();
                    std::mem::replace(&mut state.awaiting_first_lines, false)
                };
                if first {
                    setup_lines(&state, lines);
                } else {
                    spin_reels_to(&state, &tweens, &symbols, &options, &random, &gate, lines);
                }
            });
        }

        Ok(Self {
            state,
            gate,
            subscriber,
        })
    }

    /// Handle resolving when the current (or next) spin has fully settled
    pub fn complete_spin(&self) -> CompletionHandle {
        self.gate.wait()
    }

    /// Currently displayed grid, visible rows top to bottom
    pub fn visible_lines(&self) -> Lines {
        let state = self.state.lock();
        let mut lines = vec![Vec::with_capacity(state.reels.len()); state.rows];
        for reel in &state.reels {
            let reel = reel.lock();
            let mut visible: Vec<&ReelSlot> =
                reel.slots.iter().filter(|slot| slot.y >= 0.0).collect();
            visible.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
            for (row, slot) in visible.iter().take(state.rows).enumerate() {
                lines[row].push(slot.symbol.clone());
            }
        }
        lines
    }

    /// Blur intensity per reel
    pub fn reel_blurs(&self) -> Vec<f64> {
        let state = self.state.lock();
        state.reels.iter().map(|reel| reel.lock().blur).collect()
    }

    /// Scroll position per reel
    pub fn reel_positions(&self) -> Vec<f64> {
        let state = self.state.lock();
        state.reels.iter().map(|reel| reel.lock().position).collect()
    }
}

/// Replace the reel set for new grid dimensions
fn rebuild_reels(
    state: &Arc<Mutex<ReelSetState>>,
    reels: usize,
    rows: usize,
    options: &ReelSpinOptions,
) {
    let mut state = state.lock();
    state.rows = rows;
    state.reels.clear();
    if reels == 0 || rows == 0 {
        state.symbol_size = 0.0;
        return;
    }

    let reel_width = options.width / reels as f64;
    state.symbol_size = (reel_width * SYMBOL_FILL).min(options.height / rows as f64 * SYMBOL_FILL);
    for _ in 0..reels {
        // One slot more than the visible rows; the extra one scrolls in
        // from above while the bottom one scrolls out
        let slots = (0..=rows)
            .map(|row| ReelSlot {
                symbol: String::new(),
                y: row as f64 * state.symbol_size + state.symbol_size / 2.0,
            })
            .collect();
        state.reels.push(Arc::new(Mutex::new(Reel {
            slots,
            position: 0.0,
            blur: 0.0,
        })));
    }
    log::debug!("reel set rebuilt: {reels} reels x {rows} rows");
}

/// Seed the visible grid without animating
fn setup_lines(state: &Arc<Mutex<ReelSetState>>, lines: &Lines) {
    let state = state.lock();
    for (row, line) in lines.iter().enumerate() {
        for (reel_index, symbol) in line.iter().enumerate() {
            if let Some(reel) = state.reels.get(reel_index) {
                let mut reel = reel.lock();
                if let Some(slot) = reel.slots.get_mut(row) {
                    slot.symbol = symbol.clone();
                }
            }
        }
    }
}

/// Start a spin settling on `lines`
fn spin_reels_to(
    state: &Arc<Mutex<ReelSetState>>,
    tweens: &TweenScheduler,
    symbols: &SymbolSet,
    options: &ReelSpinOptions,
    random: &SharedRandom,
    gate: &SpinGate,
    lines: &Lines,
) {
    let (reels, symbol_size, rows) = {
        let state = state.lock();
        (state.reels.clone(), state.symbol_size, state.rows)
    };
    gate.begin();
    if reels.is_empty() {
        log::warn!("spin requested with no reels configured");
        gate.finish();
        return;
    }

    log::debug!("spin: {} reels over {}s", reels.len(), options.spin_duration);
    let lines = Arc::new(lines.clone());
    let reel_count = reels.len();
    let pending = Arc::new(AtomicUsize::new(reel_count));

    for (reel_index, reel) in reels.iter().enumerate() {
        let plan = SpinPlan::for_reel(reel_index, reel_count, options);
        let end_position = reel.lock().position + plan.steps;

        let update = ReelUpdate {
            end_position,
            reel_index,
            rows,
            symbol_size,
            lines: lines.clone(),
            symbols: symbols.clone(),
            random: random.clone(),
        };
        let scheduled = tweens.tween_to(
            reel.clone(),
            single_field("position", end_position),
            plan.duration,
            TweenOptions::default()
                .easing(Easing::BackOut {
                    overshoot: REEL_STOP_OVERSHOOT,
                })
                .on_update(move |dt, reel: &mut Reel, prev: &FieldValues| {
                    update.apply(dt, reel, prev);
                }),
        );

        match scheduled {
            Ok(handle) => {
                let pending = pending.clone();
                let reels = reels.clone();
                let gate = gate.clone();
                handle.completion().on_resolved(move || {
                    finish_if_last(&pending, &reels, &gate);
                });
            }
            Err(error) => {
                log::error!("reel {reel_index}: failed to schedule spin tween: {error}");
                finish_if_last(&pending, &reels, &gate);
            }
        }
    }
}

/// Order-independent join over all reels of one spin
fn finish_if_last(pending: &AtomicUsize, reels: &[Arc<Mutex<Reel>>], gate: &SpinGate) {
    if pending.fetch_sub(1, Ordering::SeqCst) == 1 {
        for reel in reels {
            reel.lock().blur = 0.0;
        }
        gate.finish();
    }
}

/// Per-frame update of one spinning reel
struct ReelUpdate {
    end_position: f64,
    reel_index: usize,
    rows: usize,
    symbol_size: f64,
    lines: Arc<Lines>,
    symbols: SymbolSet,
    random: SharedRandom,
}

impl ReelUpdate {
    fn apply(&self, dt: f64, reel: &mut Reel, prev: &FieldValues) {
        let prev_position = prev
            .get("position")
            .and_then(Value::as_number)
            .unwrap_or(reel.position);
        let position_diff = reel.position - prev_position;
        if dt > 0.0 {
            reel.blur = position_diff / (dt * BLUR_TIME_SCALE);
        }

        let slot_count = reel.slots.len();
        if slot_count == 0 {
            return;
        }
        let position = reel.position;
        for index in 0..slot_count {
            let prev_y = reel.slots[index].y;
            let y = ((position + index as f64) % slot_count as f64) * self.symbol_size
                - self.symbol_size / 2.0;
            reel.slots[index].y = y;
            // At high speed both offsets can be negative because the strip
            // wrapped fully within one frame; the diff test catches that
            if y < 0.0 && (prev_y > 0.0 || position_diff >= 1.0) {
                self.swap_symbol(&mut reel.slots[index], position);
            }
        }
    }

    /// Swap in the next symbol as a slot crosses the top boundary
    ///
    /// Slots within the final visible-row window of the remaining travel
    /// receive the spin's computed result; everything earlier shows random
    /// filler.
    fn swap_symbol(&self, slot: &mut ReelSlot, position: f64) {
        let steps_left = (self.end_position - position).floor();
        if steps_left >= 0.0 && self.end_position - position < self.rows as f64 {
            if let Some(symbol) = self
                .lines
                .get(steps_left as usize)
                .and_then(|line| line.get(self.reel_index))
            {
                slot.symbol = symbol.clone();
                return;
            }
            log::warn!(
                "reel {}: result line missing for step {steps_left}, using filler",
                self.reel_index
            );
        }
        slot.symbol = self.symbols.pick(&mut *self.random.lock()).clone();
    }
}
