use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use quire::app::App;
use quire::catalog::JsonFileSource;
use quire::config::Config;
use quire::controller::{ControllerOptions, ViewController};
use quire::keybindings::KeybindingRegistry;
use quire::preferences::FilePreferences;
use quire::print::{render_listing, PrintOptions};
use quire::surface::ViewBuffer;
use quire::theme::ThemeVariant;
use quire::ui;

/// Get the config directory path (~/.config/quire/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("quire"))
}

#[derive(Parser, Debug)]
#[command(name = "quire", about = "Terminal browser for a collection of essays")]
struct Args {
    /// Essay collection JSON (overrides `data_path` in the config file)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Config file (default: ~/.config/quire/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the listing as plain text and exit
    #[arg(long)]
    print: bool,

    /// Category key to list with --print
    #[arg(long, value_name = "KEY", requires = "print")]
    category: Option<String>,

    /// Search text to apply with --print
    #[arg(long, value_name = "TEXT", requires = "print")]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with --print output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let data_path = args
        .data
        .clone()
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(|| config_dir.join("essays.json"));
    let source = JsonFileSource::new(&data_path);

    if args.print {
        let listing = render_listing(
            &source,
            &PrintOptions {
                category: args.category,
                search: args.search,
            },
        );
        print!("{}", listing.text);
        if !listing.loaded {
            std::process::exit(1);
        }
        return Ok(());
    }

    let default_theme = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "Unknown theme in config, using light");
        ThemeVariant::Light
    });

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }
    let prefs = FilePreferences::open(config_dir.join("preferences.json"));

    let mut keybindings = KeybindingRegistry::new();
    for warning in keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    let mut controller = ViewController::new(
        ViewBuffer::new(),
        Box::new(prefs),
        ControllerOptions {
            default_theme,
            search_quiet: Duration::from_millis(config.search_debounce_ms),
        },
    );
    if !controller.load(&source) {
        tracing::error!(path = %data_path.display(), "Essay collection unavailable");
    }

    let mut app = App::new(controller, keybindings);
    ui::run(&mut app).await?;

    Ok(())
}
