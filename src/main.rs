#![forbid(unsafe_code)]

mod aspect;
mod config;
mod constants;
mod error;
mod input;
mod output;
mod resolution;
mod selector;
mod types;
mod viewfinder;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{Level as TraceLevel, error, info};
use tracing_subscriber::FmtSubscriber;

use config::Settings;
use error::RenderError;
use input::Enumeration;
use output::template::{load_template, render_template};
use output::{dump, render_json, render_template_substitutions, write_output};
use types::{Camera, ScreenGeometry};

/// Generate camera resolution settings from an enumeration of capture modes
#[derive(Parser, Debug)]
#[command(name = "camres")]
#[command(about = "Derive camera modes and hardware settings from enumerated resolutions")]
struct Args {
    /// Camera enumeration (JSON)
    input: PathBuf,

    /// Screen size as WIDTHxHEIGHT, overrides the config file
    #[arg(long, value_parser = parse_screen)]
    screen: Option<ScreenGeometry>,

    /// JSON output path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Hardware settings output path
    #[arg(long)]
    camhw: Option<PathBuf>,

    /// Hardware settings template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Log every camera's resolutions before rendering
    #[arg(long)]
    dump: bool,

    /// Skip the JSON output
    #[arg(long)]
    no_json: bool,

    /// Skip the hardware settings output
    #[arg(long)]
    no_camhw: bool,

    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_screen(s: &str) -> Result<ScreenGeometry, String> {
    ScreenGeometry::parse(s).ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))
}

fn log_level(configured: Option<&str>) -> TraceLevel {
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| "info".to_string())
        .to_lowercase();
    match level.as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

/// Read only the log level from the config file, without side effects
fn peek_log_level(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    Settings::from_toml(&contents).ok().map(|s| s.log_level)
}

fn make_json(cameras: &[Camera], screen: ScreenGeometry, path: &Path) -> Result<(), RenderError> {
    info!(path = %path.display(), "Writing json");
    let document = render_json(cameras, screen);
    write_output(path, &document.to_json_string()?)
}

fn make_camhw(
    cameras: &[Camera],
    screen: ScreenGeometry,
    template: &Path,
    path: &Path,
) -> Result<(), RenderError> {
    info!(path = %path.display(), template = %template.display(), "Writing hardware settings");
    let lines = load_template(template)?;
    let substitutions = render_template_substitutions(cameras, screen);
    write_output(path, &render_template(&lines, &substitutions))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(Settings::default_path);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(peek_log_level(&config_path).as_deref()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut settings = Settings::load(&config_path)?;
    if let Some(screen) = args.screen {
        settings.screen_width = screen.width;
        settings.screen_height = screen.height;
    }
    if let Some(template) = args.template {
        settings.template_path = template;
    }
    if let Some(json) = args.json {
        settings.json_output = json;
    }
    if let Some(camhw) = args.camhw {
        settings.camhw_output = camhw;
    }
    let screen = settings.screen();
    info!(screen = %screen, config = %config_path.display(), "Settings loaded");

    let cameras = Enumeration::load(&args.input)
        .context("Cannot continue without a camera enumeration")?
        .into_cameras();

    if args.dump {
        dump(&cameras);
    }

    let mut failed = 0;
    if !args.no_json
        && let Err(e) = make_json(&cameras, screen, &settings.json_output)
    {
        error!(error = %e, "JSON render failed");
        failed += 1;
    }
    if !args.no_camhw
        && let Err(e) = make_camhw(
            &cameras,
            screen,
            &settings.template_path,
            &settings.camhw_output,
        )
    {
        error!(error = %e, "Hardware settings render failed");
        failed += 1;
    }

    if failed > 0 {
        anyhow::bail!("{failed} render(s) failed");
    }
    Ok(())
}
