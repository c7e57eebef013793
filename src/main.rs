#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use bankwidgets_core::ClientConfig;
use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};

use crate::context::AppContext;

/// Global widget context, built from command line and config before launch
static APP_CONTEXT: OnceLock<AppContext> = OnceLock::new();

/// Get the widget context (set once in `main`)
pub fn get_app_context() -> Option<AppContext> {
    APP_CONTEXT.get().cloned()
}

/// Bank Widgets - linked accounts and scheduled transfers
#[derive(Parser, Debug)]
#[command(name = "bankwidgets-desktop")]
#[command(about = "Bank Widgets - linked accounts and scheduled transfers")]
struct Args {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Backend origin (overrides config file and environment)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file (default: <config dir>/bankwidgets/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON object of string resource overrides
    #[arg(long)]
    strings: Option<PathBuf>,

    /// Also write JSONL logs under this directory
    #[arg(long)]
    logs_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    bankwidgets_core::logging::init(
        args.verbose,
        args.logs_dir.as_deref().map(|dir| (dir, "desktop")),
    )?;

    let config_path = args.config.unwrap_or_else(ClientConfig::default_path);
    let mut config = ClientConfig::load(Some(&config_path))
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(url) = args.base_url {
        config.base_url = url;
    }
    if let Some(path) = args.strings {
        config.strings_file = Some(path);
    }

    tracing::info!("Starting with backend {}", config.base_url);

    let context = AppContext::from_config(config).context("Failed to initialize widgets")?;
    let _ = APP_CONTEXT.set(context);

    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Bank Widgets")
            .with_inner_size(dioxus::desktop::LogicalSize::new(560.0, 820.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .launch(app::App);

    Ok(())
}
