use std::fs;
use std::path::Path;

use kb_simulation::DiceSetup;

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("file '{}' already exists", path.display()));
    }

    let json = DiceSetup::classic()
        .to_json_pretty()
        .map_err(|e| format!("cannot serialize setup: {e}"))?;
    fs::write(path, json + "\n").map_err(|e| format!("cannot write '{}': {e}", path.display()))?;

    println!("Created setup '{}'", path.display());
    println!();
    println!("Get started:");
    println!("  # Edit anchors, face values, and combinations");
    println!("  kb check --config {}", path.display());
    println!("  kb throw --config {}", path.display());

    Ok(())
}
