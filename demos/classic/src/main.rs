//! classic — the canonical five-philosopher table.
//!
//! Runs the contention engine for one simulated minute at the classic tuning
//! (thinking 2–5 s, eating 1–3 s, one evaluation pass per second) and prints
//! a state panel every few seconds.  Change `SEED` to watch a different — but
//! equally reproducible — evening unfold.

use anyhow::Result;

use dp_core::{SimConfig, Tick};
use dp_sim::{Sim, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 42;
const RUN_TICKS:   u64 = 60; // one simulated minute at 1 s per tick
const PANEL_EVERY: u64 = 5;  // ticks between state panels

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tallies state changes across the run.
#[derive(Default)]
struct TransitionTally {
    transitions: usize,
    busiest:     (Tick, usize),
}

impl SimObserver for TransitionTally {
    fn on_tick_end(&mut self, tick: Tick, transitions: usize) {
        self.transitions += transitions;
        if transitions > self.busiest.1 {
            self.busiest = (tick, transitions);
        }
    }
}

// ── State panel ───────────────────────────────────────────────────────────────

fn print_panel(sim: &Sim) {
    let snap = sim.snapshot();
    println!("── {} ──", sim.clock);
    println!("{:<6} {:<10} {:>9} {:>9}", "Seat", "State", "In-state", "Progress");
    for p in &snap.philosophers {
        let progress = match p.phase_progress {
            Some(f) => format!("{:>8.0}%", f * 100.0),
            None    => "        -".to_string(),
        };
        println!(
            "{:<6} {:<10} {:>7.1} s {}",
            p.id.0,
            p.state,
            p.state_timer_ms as f64 / 1_000.0,
            progress,
        );
    }
    let forks: Vec<String> = snap
        .forks
        .iter()
        .map(|f| match f.owner {
            Some(owner) => format!("{}:#{}", f.id.0, owner.0),
            None        => format!("{}:free", f.id.0),
        })
        .collect();
    println!("forks  {}", forks.join("  "));
    println!();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== classic — rust_dp dining philosophers ===");
    println!("Seats: 5  |  Ticks: {RUN_TICKS}  |  Seed: {SEED}");
    println!();

    // 1. Config: the defaults are the classic tuning; only the seed is ours.
    let config = SimConfig { seed: SEED, ..SimConfig::default() };

    // 2. Build and start.
    let mut sim = SimBuilder::new(config).build()?;
    sim.start();
    print_panel(&sim);

    // 3. Run in panel-sized chunks.
    let mut tally = TransitionTally::default();
    let mut ticks_done = 0;
    while ticks_done < RUN_TICKS {
        let chunk = PANEL_EVERY.min(RUN_TICKS - ticks_done);
        sim.run_ticks(chunk, &mut tally)?;
        ticks_done += chunk;
        print_panel(&sim);
    }

    // 4. Pause and summarize.
    sim.pause();
    println!("Run complete after {}.", sim.clock);
    println!("  state changes : {}", tally.transitions);
    println!(
        "  busiest tick  : {} ({} changes)",
        tally.busiest.0, tally.busiest.1
    );

    // 5. Reset: everything back to a fresh table.
    sim.reset();
    let snap = sim.snapshot();
    println!(
        "Reset: {} seats thinking, {} forks free.",
        snap.philosophers.len(),
        snap.forks.iter().filter(|f| f.available).count(),
    );

    Ok(())
}
