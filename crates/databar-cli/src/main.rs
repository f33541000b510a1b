//! databar CLI - render data bars to SVG, check settings, inspect mappings.

#![allow(clippy::needless_pass_by_value, clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use databar::{visual_transform, DataBarVisual, DataView, VisualSettings};
use databar_core::{RecordingCanvas, Size, SvgCanvas};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "databar")]
#[command(about = "KPI data bar renderer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a data view to SVG
    Render {
        /// Data view JSON file
        #[arg(short, long)]
        data: PathBuf,

        /// Settings file (yaml, json or toml)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Canvas width in pixels
        #[arg(long, default_value = "400")]
        width: f32,

        /// Canvas height in pixels
        #[arg(long, default_value = "80")]
        height: f32,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a settings file
    Check {
        /// Settings file (yaml, json or toml)
        #[arg(default_value = "settings.yaml")]
        settings: PathBuf,
    },

    /// Print the mapped bars and their tooltips as JSON
    Inspect {
        /// Data view JSON file
        #[arg(short, long)]
        data: PathBuf,

        /// Settings file (yaml, json or toml)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            data,
            settings,
            width,
            height,
            output,
        } => {
            render(&data, settings.as_deref(), Size::new(width, height), output.as_deref());
        }
        Commands::Check { settings } => {
            check_settings(&settings);
        }
        Commands::Inspect { data, settings } => {
            inspect(&data, settings.as_deref());
        }
    }
}

fn load_view(path: &Path) -> DataView {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read data view {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    match DataView::from_json(&content) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("Data view invalid: {e}");
            std::process::exit(1);
        }
    }
}

fn load_settings(path: Option<&Path>) -> VisualSettings {
    let Some(path) = path else {
        return VisualSettings::default();
    };
    match VisualSettings::load(path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Settings invalid: {e}");
            std::process::exit(1);
        }
    }
}

fn render(data: &Path, settings: Option<&Path>, viewport: Size, output: Option<&Path>) {
    let view = load_view(data);
    let settings = load_settings(settings);

    let mut visual = DataBarVisual::new();
    let mut canvas = SvgCanvas::new(viewport);
    visual.update(&view, &settings, viewport, &mut canvas);
    info!(bars = visual.hit_regions().len(), "rendered");
    let svg = canvas.finish();

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, svg) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!("Wrote {}", path.display());
        }
        None => print!("{svg}"),
    }
}

fn check_settings(path: &Path) {
    println!("Checking settings: {}", path.display());

    let settings = load_settings(Some(path));
    match settings.validate() {
        Ok(()) => {
            println!("Settings valid!");
            println!("  Orientation: {}", settings.items.orientation);
            println!("  Category position: {}", settings.section.position);
            println!("  Text position: {}", settings.text.position);
            println!("  Header: {}", if settings.header.show { "shown" } else { "hidden" });
        }
        Err(e) => {
            eprintln!("Settings invalid: {e}");
            std::process::exit(1);
        }
    }
}

fn inspect(data: &Path, settings: Option<&Path>) {
    let view = load_view(data);
    let settings = load_settings(settings);

    let mut visual = DataBarVisual::new();
    let mut canvas = RecordingCanvas::new();
    visual.update(&view, &settings, Size::new(400.0, 80.0), &mut canvas);

    let report = serde_json::json!({
        "transform": visual_transform(&view),
        "regions": visual.hit_regions(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    }
}
