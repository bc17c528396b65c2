use std::io::Write;
use std::path::PathBuf;

use anchorfp::{
    cleaned_url, detect_action, parse_location, try_decode_state, try_deserialize, AnchorConfig,
    StateCodec, ViewState,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "anchorfp",
    about = "Inspect anchor tokens, view-state links and URL triggers",
    version
)]
pub struct Cli {
    /// Log filter (e.g. `debug`, `fingerprint=trace`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// YAML config supplying the state parameter name.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a descriptor token and print the descriptors as JSON.
    Anchors { token: String },

    /// Decode view state from a token or from a URL carrying it.
    View { input: String },

    /// Print the trigger action found in a URL and the cleaned URL.
    Detect { url: String },

    /// Build a view-state token, or a full URL with --base.
    #[command(name = "encode-view")]
    EncodeView(EncodeViewArgs),
}

#[derive(Debug, Args)]
pub struct EncodeViewArgs {
    /// Toggle id to show (repeatable).
    #[arg(long = "shown")]
    pub shown: Vec<String>,

    /// Toggle id to peek (repeatable).
    #[arg(long = "peek")]
    pub peek: Vec<String>,

    /// Tab selection as `group=tab` (repeatable).
    #[arg(long = "tab")]
    pub tabs: Vec<String>,

    /// Serialized anchor token to focus (repeatable).
    #[arg(long = "focus")]
    pub focus: Vec<String>,

    /// Embed the token into this URL instead of printing it bare.
    #[arg(long)]
    pub base: Option<String>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let codec = match &cli.config {
        Some(path) => AnchorConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .state_codec()?,
        None => StateCodec::default(),
    };

    match cli.command {
        Commands::Anchors { token } => {
            let descriptors = try_deserialize(&token).context("decoding anchor token")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&descriptors)?)?;
        }
        Commands::View { input } => {
            let state = match parse_location(&input) {
                Ok(url) => codec
                    .extract(&url)
                    .with_context(|| format!("no valid `{}` parameter in URL", codec.param_name()))?,
                Err(_) => try_decode_state(&input).context("decoding view state")?,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        }
        Commands::Detect { url } => {
            let url = parse_location(&url)?;
            match detect_action(&url) {
                Some(action) => {
                    let report = serde_json::json!({
                        "action": action,
                        "cleaned": cleaned_url(&url, &action).as_str(),
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                }
                None => writeln!(out, "no action")?,
            }
        }
        Commands::EncodeView(args) => {
            let state = build_state(&args)?;
            match &args.base {
                Some(base) => {
                    let base = parse_location(base)?;
                    writeln!(out, "{}", codec.embed(&base, Some(&state)))?;
                }
                None => writeln!(out, "{}", anchorfp::encode_state(&state))?,
            }
        }
    }
    Ok(())
}

fn build_state(args: &EncodeViewArgs) -> Result<ViewState> {
    let mut state = ViewState::new();
    state.shown_toggles.extend(args.shown.iter().cloned());
    state.peek_toggles.extend(args.peek.iter().cloned());
    for tab in &args.tabs {
        let Some((group, selected)) = tab.split_once('=') else {
            bail!("tab {tab:?} must look like group=tab");
        };
        if group.is_empty() || selected.is_empty() {
            bail!("tab {tab:?} must look like group=tab");
        }
        state.tabs.insert(group.to_string(), selected.to_string());
    }
    if !args.focus.is_empty() {
        state.focus = Some(args.focus.clone());
    }
    Ok(state)
}
