use anyhow::Result;
use clap::Args;

use relay_core::history::Tool;

use crate::store;

#[derive(Args)]
pub struct HistoryArgs {
    /// Limit output to one tool (event, tracking, or woo)
    pub tool: Option<String>,

    /// Also print the stored input payload for each entry
    #[arg(long)]
    pub payload: bool,
}

pub fn run(args: HistoryArgs) -> Result<()> {
    let history = store::load()?;

    let tools: Vec<Tool> = match &args.tool {
        Some(name) => vec![name.parse().map_err(|err: String| anyhow::anyhow!(err))?],
        None => Tool::ALL.to_vec(),
    };

    let mut printed = false;
    for tool in tools {
        if history.is_empty(tool) {
            continue;
        }
        printed = true;

        println!("{}:", tool.name());
        for entry in history.recent(tool) {
            println!(
                "  {}  {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.label
            );
            if args.payload {
                println!("    {}", serde_json::to_string(&entry.payload)?);
            }
        }
    }

    if !printed {
        println!("No generated history yet.");
    }

    Ok(())
}
