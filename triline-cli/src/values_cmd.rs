//! Values command - opening value of every cell

use anyhow::{Context, Result};

use triline_core::{cell_values, GameConfig};

/// Print the heuristic value of each cell when O occupies it alone
pub fn run(config: &GameConfig) -> Result<()> {
    let values = cell_values(config.size, config.k).context("Failed to compute cell values")?;

    let width = values
        .iter()
        .flatten()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);

    for row in values {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>width$}", v.to_string())).collect();
        println!("{}", cells.join(" "));
    }
    Ok(())
}
