// ABOUTME: Main application entry point.
// ABOUTME: Loads an artwork manifest, lays it out for one or more container widths, prints the rows.

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gallery_core::{Artwork, Category, Config, LayoutSettings};
use gallery_layout::{layout_height, Gallery, Row};

#[derive(Debug, Parser)]
#[command(name = "justify", about = "Pack gallery artworks into justified rows")]
struct Args {
    /// JSON array of artworks
    manifest: PathBuf,

    /// Container width in pixels; repeat to simulate resizes
    #[arg(short, long = "width", required = true)]
    widths: Vec<f64>,

    /// Fixed target row height, ignoring the breakpoint table
    #[arg(long)]
    row_height: Option<f64>,

    /// Gap between items and rows in pixels
    #[arg(long)]
    gap: Option<f64>,

    /// Only lay out artworks from this category (paintings or drawings)
    #[arg(long)]
    category: Option<Category>,

    /// Config file (defaults to ~/.config/justified-gallery/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print rows as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct LayoutReport<'a> {
    container_width: f64,
    target_row_height: f64,
    gap: f64,
    height: f64,
    rows: &'a [Row],
}

fn load_settings(args: &Args) -> Result<LayoutSettings> {
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_or_default(),
    };
    Ok(apply_overrides(config.layout, args.row_height, args.gap))
}

fn apply_overrides(mut settings: LayoutSettings, row_height: Option<f64>, gap: Option<f64>) -> LayoutSettings {
    if let Some(height) = row_height {
        settings.default_row_height = height;
        settings.breakpoints.clear();
    }
    if let Some(gap) = gap {
        settings.gap = gap;
    }
    settings
}

fn render_text(gallery: &Gallery<Artwork>) -> String {
    let gap = gallery.settings().gap;
    let rows = gallery.rows();

    let mut out = format!(
        "{}px wide, target {}px, gap {}px: {} rows, {:.1}px tall\n",
        gallery.container_width(),
        gallery.target_row_height(),
        gap,
        rows.len(),
        layout_height(rows, gap)
    );
    for (i, row) in rows.iter().enumerate() {
        let indices: Vec<String> = row.items.iter().map(|item| item.index.to_string()).collect();
        let ids: Vec<&str> = row
            .resolve(gallery.items())
            .map(|(_, artwork)| artwork.id.as_str())
            .collect();
        out.push_str(&format!(
            "  row {:<3} {:>8.2}px  {} items  [{}]  {:>8.2}px wide  {}\n",
            i,
            row.height,
            row.len(),
            indices.join(", "),
            row.total_width(gap),
            ids.join(" ")
        ));
    }
    out
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = load_settings(&args)?;
    settings.validate().context("invalid layout settings")?;

    let mut artworks = Artwork::load_manifest(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;
    if let Some(category) = args.category {
        artworks = category.filter(&artworks);
        tracing::info!("{} {} selected", artworks.len(), category.label().to_lowercase());
    }

    let mut gallery = Gallery::new(artworks, settings);
    let (tx, mut rx) = mpsc::channel();
    let mut reports = Vec::new();

    for &width in &args.widths {
        tx.send(width).context("width channel closed")?;
        if !gallery.sync(&mut rx)? {
            tracing::info!("Layout unchanged at {}px", width);
            continue;
        }

        if args.json {
            let report = LayoutReport {
                container_width: gallery.container_width(),
                target_row_height: gallery.target_row_height(),
                gap: gallery.settings().gap,
                height: layout_height(gallery.rows(), gallery.settings().gap),
                rows: gallery.rows(),
            };
            reports.push(serde_json::to_value(&report)?);
        } else {
            print!("{}", render_text(&gallery));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
