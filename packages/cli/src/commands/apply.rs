use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{EditorAction, EditorState, PageDocument};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Page document (.json) to edit
    pub document: PathBuf,

    /// JSON array of editor actions
    pub actions: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Replay an action script against a document offline
pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = PageDocument::load(&args.document)?;

    let script = std::fs::read_to_string(&args.actions)
        .with_context(|| format!("Cannot read {}", args.actions.display()))?;
    let actions: Vec<EditorAction> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid action list in {}", args.actions.display()))?;

    let mut state = EditorState::with_history_limit(config.history_limit);
    state.dispatch(EditorAction::SetInitialState {
        content: document.content,
        page_styles: document.page_styles,
    });
    state.dispatch(EditorAction::PushHistory);

    // Progress goes to stderr so the document can be piped
    eprintln!("🛠  {} {} action(s)", "Applying".green().bold(), actions.len());
    let mut skipped = 0;
    for (step, action) in actions.into_iter().enumerate() {
        let name = action.name();
        match state.try_dispatch(action) {
            Ok(()) => eprintln!("   {} {:>3} {}", "✓".green(), step + 1, name),
            Err(e) => {
                skipped += 1;
                eprintln!("   {} {:>3} {} ({})", "✗".yellow(), step + 1, name, e);
            }
        }
    }

    let history = state.history();
    eprintln!();
    eprintln!(
        "   History: {} snapshot(s), at {}, undo {}, redo {}",
        history.len(),
        history.index().map_or("-".to_string(), |i| (i + 1).to_string()),
        yes_no(history.can_undo()),
        yes_no(history.can_redo()),
    );
    if skipped > 0 {
        eprintln!("   {} {} action(s) had no effect", "Skipped:".yellow(), skipped);
    }

    match args.output {
        Some(path) => {
            state.document().save(&path)?;
            eprintln!("✨ {} Wrote {}", "Done".green().bold(), path.display());
        }
        None => println!("{}", state.document().to_json_pretty()?),
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
