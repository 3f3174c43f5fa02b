use anyhow::{anyhow, Result};
use clap::Args;
use pagecraft_editor::{create_node, IdGenerator, NodeKind};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Element kind (section, columns, heading, steps, ...)
    pub kind: String,

    /// Fixed id seed instead of a random one
    #[arg(long)]
    pub seed: Option<String>,
}

/// Print the default node(s) for an element kind as JSON
pub fn new(args: NewArgs) -> Result<()> {
    let kind: NodeKind = args.kind.parse().map_err(|e| {
        let known: Vec<&str> = NodeKind::ALL.iter().map(|kind| kind.as_str()).collect();
        anyhow!("{}. Known kinds: {}", e, known.join(", "))
    })?;

    let mut ids = match args.seed {
        Some(seed) => IdGenerator::from_seed(seed),
        None => IdGenerator::new(),
    };

    let nodes = create_node(kind, &mut ids).into_vec();
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}
