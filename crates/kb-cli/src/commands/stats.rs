use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(config: Option<&Path>, seed: u64, rounds: u32) -> Result<(), String> {
    if rounds == 0 {
        return Err("--rounds must be at least 1".into());
    }
    let setup = super::load_setup(config)?;
    let mut ctl = super::controller(&setup, seed)?;

    let mut faces: BTreeMap<String, (i32, u32)> = BTreeMap::new();
    let mut combos: BTreeMap<String, u32> = setup
        .rules
        .combinations
        .iter()
        .map(|c| (c.name.clone(), 0))
        .collect();
    let mut total_sum: i64 = 0;
    let mut forced: u32 = 0;
    let mut bodies: u32 = 0;

    for index in 0..rounds {
        let outcome = super::play_round(&mut ctl, index)?;
        total_sum += i64::from(outcome.sum);
        for name in &outcome.combos {
            *combos.entry(name.clone()).or_default() += 1;
        }
        for body in ctl.bodies() {
            let face = body.face.clone().unwrap_or_else(|| "(none)".to_string());
            faces.entry(face).or_insert((body.value, 0)).1 += 1;
            bodies += 1;
            if body.forced {
                forced += 1;
            }
        }
    }

    println!(
        "  {} {}",
        "Statistics".bold(),
        format!("({rounds} rounds, seed={seed})").dimmed()
    );
    println!(
        "  Mean sum {:.2}, forced by timeout {}",
        total_sum as f64 / f64::from(rounds),
        percent(forced, bodies)
    );
    println!();

    println!("  {}", "Faces".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Face", "Value", "Count", "Share"]);
    for (face, (value, count)) in &faces {
        table.add_row(vec![
            face.clone(),
            value.to_string(),
            count.to_string(),
            percent(*count, bodies),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Combinations".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Combination", "Hits", "Rate"]);
    for (name, hits) in &combos {
        table.add_row(vec![name.clone(), hits.to_string(), percent(*hits, rounds)]);
    }
    println!("{table}");

    Ok(())
}

fn percent(part: u32, whole: u32) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", f64::from(part) * 100.0 / f64::from(whole))
}
