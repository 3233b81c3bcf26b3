//! SpinWorks headless simulator
//!
//! Wires the full stack (machine, model, view-models, tween scheduler and
//! reel spin controller) and drives spins with a fixed frame step until
//! each one settles. Useful for validating the animation core without a
//! renderer, and for deterministic replays via `--seed`.

use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use sw_core::{FullLinesConfig, FullLinesMachine, Line, SeededRandom, SharedRandom};
use sw_reels::{
    DefaultStrings, ReelSpinController, ReelSpinOptions, SlotMachineViewModel, SlotReelsModel,
    SlotReelsViewModel, Strings,
};
use sw_tween::TweenScheduler;

/// Frame budget multiplier before a spin is declared stuck
const SETTLE_BUDGET_FACTOR: f64 = 4.0;

#[derive(Parser, Debug)]
#[command(name = "sw-sim", about = "Headless SpinWorks reel spin simulator")]
struct Args {
    /// RNG seed for a deterministic session
    #[arg(long)]
    seed: Option<u64>,

    /// Number of spins to run
    #[arg(long, default_value_t = 1)]
    spins: u32,

    /// Frame rate driving the tween scheduler
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Emit one JSON report per spin instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SpinReport {
    spin: u32,
    frames: u32,
    lines: Vec<Line>,
    wins: usize,
    title: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "fps must be positive");

    let random: SharedRandom = match args.seed {
        Some(seed) => sw_core::shared_random(SeededRandom::with_seed(seed)),
        None => sw_core::shared_random(SeededRandom::new()),
    };

    let symbols = sw_core::SymbolSet::of(&["🍒", "🍋", "⭐", "💎", "🔔"])?;
    let machine = FullLinesMachine::new(
        FullLinesConfig {
            width: 3,
            height: 3,
            symbols: symbols.clone(),
        },
        random.clone(),
    )?;
    let model = Arc::new(SlotReelsModel::new(
        &symbols,
        3,
        3,
        Box::new(machine),
        &random,
    ));
    let reels_vm = SlotReelsViewModel::new(model.clone());
    let strings: Arc<dyn Strings> = Arc::new(DefaultStrings::new());
    let machine_vm = SlotMachineViewModel::new(&model, strings);

    let tweens = TweenScheduler::new();
    let options = ReelSpinOptions::default();
    let spin_duration = options.spin_duration;
    let controller = ReelSpinController::new(
        &reels_vm,
        tweens.clone(),
        symbols,
        options,
        random,
    )?;

    log::info!("Starting SpinWorks simulator: {} spin(s) at {} fps", args.spins, args.fps);

    let dt = 1.0 / args.fps;
    let frame_budget = (spin_duration * args.fps * SETTLE_BUDGET_FACTOR).ceil() as u32;
    for spin in 0..args.spins {
        reels_vm.spin();
        let done = controller.complete_spin();

        let mut frames = 0;
        while !done.is_resolved() {
            tweens.tick(dt);
            frames += 1;
            anyhow::ensure!(
                frames <= frame_budget,
                "spin {spin} did not settle within {frame_budget} frames"
            );
        }
        log::info!("spin {spin}: settled after {frames} frames");

        let report = SpinReport {
            spin,
            frames,
            lines: controller.visible_lines(),
            wins: model.wins().get().len(),
            title: machine_vm.title().get(),
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for line in &report.lines {
                println!("{}", line.join(" "));
            }
            println!("{} ({} frames)\n", report.title, report.frames);
        }
    }

    Ok(())
}
