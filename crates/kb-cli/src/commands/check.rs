use std::path::Path;

use colored::Colorize;
use kb_mechanics::validate::has_errors;

pub fn run(path: &Path) -> Result<(), String> {
    let setup = super::load_setup(Some(path))?;
    let issues = setup.validate();

    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }

    if has_errors(&issues) {
        let errors = issues.iter().filter(|i| i.is_error).count();
        return Err(format!(
            "{errors} error{} in '{}'",
            if errors == 1 { "" } else { "s" },
            path.display()
        ));
    }

    println!("  All checks passed for '{}'.", path.display());
    println!(
        "  {} faces, {} anchors, {} combinations",
        setup.rules.faces.len(),
        setup.anchor_set().len(),
        setup.rules.combinations.len()
    );
    Ok(())
}
