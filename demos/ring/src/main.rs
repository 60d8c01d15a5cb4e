//! ring — the reference Nagel–Schreckenberg run.
//!
//! Runs `SimConfig::default()`: five cars on a 60-cell single-lane ring, max
//! speed 4, slowdown probability 0.3, 100 steps.  Set `RUST_LOG=debug` to see every step.

use std::time::Instant;

use anyhow::Result;
use log::info;

use nasch_core::SimConfig;
use nasch_metrics::DataCollector;
use nasch_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const HISTORY_ROWS: usize = 10; // trailing averages shown in the summary

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = SimConfig::default();

    println!("=== ring — Nagel–Schreckenberg traffic ===");
    println!(
        "Cells: {}  |  Vehicles: {}  |  Max speed: {}  |  Steps: {}  |  Seed: {}",
        config.capacity(),
        config.vehicle_count,
        config.max_speed,
        config.step_budget,
        config.seed,
    );
    println!();

    let mut sim = SimBuilder::new(config, DataCollector::new()).build()?;

    let t0 = Instant::now();
    while sim.running() {
        sim.step()?;
    }
    let elapsed = t0.elapsed();
    info!("run finished in {:.3} ms", elapsed.as_secs_f64() * 1e3);

    // Summary.
    let averages = sim.averages();
    let overall = averages.iter().sum::<f64>() / averages.len() as f64;
    println!("Simulation complete: {} steps in {:.3} ms", sim.step_count().0, elapsed.as_secs_f64() * 1e3);
    println!("  captures recorded : {}", sim.observer().captures());
    println!("  mean speed        : {overall:.3}");
    println!();

    println!("{:<8} {:<10}", "Step", "Avg speed");
    println!("{}", "-".repeat(18));
    let rows = sim.observer().model_rows();
    for row in &rows[rows.len().saturating_sub(HISTORY_ROWS)..] {
        println!("{:<8} {:<10.3}", row.step, row.average_speed);
    }
    println!();

    // Final vehicle table.
    println!("{:<10} {:<8} {:<8}", "Vehicle", "Cell", "Speed");
    println!("{}", "-".repeat(26));
    for v in sim.vehicles() {
        println!("{:<10} {:<8} {:<8}", v.id.0, v.position.x, v.speed);
    }

    Ok(())
}
