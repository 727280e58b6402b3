//! Replays a recorded input script against a panel session.

use std::cell::RefCell;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Context as _};
use clap::Parser;
use picker_panel::input::InputEvent;
use picker_panel::{PanelEvent, PanelOptions, PanelSession};
use picker_panel_config::Config;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a config file to use instead of the built-in tuning.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON array of input events to replay.
    script: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Summary {
    state: picker_panel::PanelState,
    offset: Option<f64>,
    progress: f64,
    preview_effect: picker_panel::panel::effects::PreviewEffect,
}

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "picker_panel=debug".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|err| anyhow!("{err:?}"))?,
        None => Config::default(),
    };
    let options = PanelOptions::from_config(&config).context("invalid panel options")?;

    let script = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("error reading {:?}", cli.script))?;
    let inputs: Vec<InputEvent> =
        serde_json::from_str(&script).with_context(|| format!("error parsing {:?}", cli.script))?;
    info!("replaying {} input events", inputs.len());

    let mut session = PanelSession::new(options)?;

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    session.add_listener(move |event: &PanelEvent| sink.borrow_mut().push(*event));
    session.set_dismiss_sink(|| info!("picker dismissed"));

    for input in inputs {
        if !session.process(input) {
            warn!("input had no effect: {input:?}");
        }

        for event in events.borrow_mut().drain(..) {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    session.teardown();
    for event in events.borrow_mut().drain(..) {
        println!("{}", serde_json::to_string(&event)?);
    }

    let summary = Summary {
        state: session.state(),
        offset: session.panel().offset(),
        progress: session.panel().progress(),
        preview_effect: session.preview_effect(),
    };
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}
