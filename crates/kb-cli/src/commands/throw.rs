use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

use kb_simulation::{RoundController, RoundEventKind};

pub fn run(
    config: Option<&Path>,
    seed: u64,
    rounds: u32,
    verbose: bool,
    json: bool,
    strict: bool,
) -> Result<(), String> {
    let setup = super::load_setup(config)?;
    if strict {
        setup.ensure_complete().map_err(|e| e.to_string())?;
    }
    let mut ctl = super::controller(&setup, seed)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Round", "Values", "Sum", "Combos"]);
    let mut records = Vec::new();

    if !json {
        println!(
            "  {} {}",
            "Throw".bold(),
            format!("({rounds} round{}, seed={seed})", plural(rounds)).dimmed()
        );
        println!();
    }

    for index in 0..rounds {
        let outcome = super::play_round(&mut ctl, index)?;
        let forced = ctl.bodies().iter().filter(|b| b.forced).count();

        if json {
            records.push(json!({
                "round": index + 1,
                "values": outcome.values,
                "sum": outcome.sum,
                "combos": outcome.combos,
                "forced": forced,
            }));
            continue;
        }

        if verbose {
            print_events(&ctl, index);
        }
        table.add_row(vec![
            (index + 1).to_string(),
            format_values(&ctl),
            outcome.sum.to_string(),
            if outcome.combos.is_empty() {
                "-".to_string()
            } else {
                outcome.combos.join(", ")
            },
        ]);
    }

    if json {
        let out = serde_json::to_string_pretty(&records).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        println!("{table}");
        println!("  {}", "* forced by timeout".dimmed());
    }
    Ok(())
}

fn format_values(ctl: &RoundController) -> String {
    ctl.bodies()
        .iter()
        .map(|b| {
            if b.forced {
                format!("{}*", b.value)
            } else {
                b.value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_events(ctl: &RoundController, index: u32) {
    println!("  {}", format!("Round {} events", index + 1).bold().underline());
    for event in ctl.events().events() {
        let frame_label = format!("[frame {:>3}]", event.frame).dimmed();
        let desc = colorize_event(&event.kind, &event.description);
        println!("  {frame_label} {desc}");
    }
    println!();
}

fn colorize_event(kind: &RoundEventKind, description: &str) -> colored::ColoredString {
    match kind {
        RoundEventKind::Thrown | RoundEventKind::Reset | RoundEventKind::Resized => {
            description.bold()
        }
        RoundEventKind::Settled { .. } => description.cyan(),
        RoundEventKind::Unsettled { .. } => description.dimmed(),
        RoundEventKind::Nudged { .. } => description.yellow(),
        RoundEventKind::SnapStarted { .. } => description.blue(),
        RoundEventKind::Resolved { forced: true, .. } => description.red(),
        RoundEventKind::Resolved { .. } => description.green(),
        RoundEventKind::ForceSnap { .. } => description.red().bold(),
        RoundEventKind::Completed { .. } => description.green().bold(),
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}
