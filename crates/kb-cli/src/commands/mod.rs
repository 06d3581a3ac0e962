pub mod check;
pub mod init;
pub mod stats;
pub mod throw;

use std::path::Path;

use kb_mechanics::Outcome;
use kb_simulation::{DiceSetup, RoundController, SimConfig};

/// Host frame interval used when driving rounds headlessly.
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Gap between the start of consecutive rounds on the simulated clock.
const ROUND_GAP_MS: f64 = 10_000.0;

/// Load a setup file, or the classic setup when no path is given.
fn load_setup(path: Option<&Path>) -> Result<DiceSetup, String> {
    let Some(path) = path else {
        return Ok(DiceSetup::classic());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    DiceSetup::from_json(&json).map_err(|e| format!("invalid setup '{}': {e}", path.display()))
}

/// Build a validated controller for `setup`.
fn controller(setup: &DiceSetup, seed: u64) -> Result<RoundController, String> {
    let config = SimConfig::default().with_seed(seed).with_max_events(500);
    config.validate().map_err(|e| e.to_string())?;
    Ok(RoundController::new(config, setup))
}

/// Throw round `index` to completion and return its outcome.
fn play_round(ctl: &mut RoundController, index: u32) -> Result<Outcome, String> {
    let config = ctl.config();
    let max_frames = ((config.force_snap_ms + config.snap_ms) / FRAME_MS).ceil() as u64 + 2;
    let start_ms = f64::from(index) * ROUND_GAP_MS;
    ctl.run_to_completion(start_ms, FRAME_MS, max_frames)
        .cloned()
        .ok_or_else(|| format!("round {} did not complete", index + 1))
}
