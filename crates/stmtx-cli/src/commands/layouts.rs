//! Layouts command - list the recognizer registry.

use console::style;

use stmtx_core::Registry;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let registry = Registry::from_names(&config.extraction.layouts)?;

    println!("{}", style("Layouts in priority order:").bold());
    for (i, recognizer) in registry.iter().enumerate() {
        println!(
            "  {}. {} [{}] {}",
            i + 1,
            style(format!("{:<14}", recognizer.name())).cyan(),
            recognizer.schema(),
            recognizer.description()
        );
    }

    Ok(())
}
