//! Command-line interface for artquiz.
//!
//! Provides the interactive quiz plus commands for browsing the catalog
//! (categories, artists, gallery) and checking the data.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{
    artist_directory, artist_profile, directory_columns, load_catalog, source_for, Catalog,
    DiagnosticsReport,
};
use crate::config::{self, ResolvedConfig};
use crate::core::CollectionFilter;

pub mod play;

/// artquiz - Guess the painter
#[derive(Parser, Debug)]
#[command(name = "artquiz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory or base URL (overrides config and ARTQUIZ_DATA)
    #[arg(long, global = true)]
    pub data: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play the quiz in the terminal
    Play {
        /// Category to start in (see `artquiz categories`)
        #[arg(short, long)]
        category: Option<String>,

        /// Seed for a reproducible sequence of questions
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List categories with painting and painter counts
    Categories {
        /// Include categories with no paintings
        #[arg(long)]
        all: bool,
    },

    /// List all artists with their painting counts
    Artists {
        /// Number of columns
        #[arg(short, long, default_value = "1")]
        columns: usize,
    },

    /// Show an artist's profile card
    Artist {
        /// Artist name, as it appears in the catalog
        name: String,
    },

    /// List paintings in shuffled order
    Gallery {
        /// Maximum number of paintings to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write a Markdown report on the catalog data
    Diagnose {
        /// Output file (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = self.resolved_config()?;

        match self.command {
            Commands::Play { category, seed } => play::run(&cfg, category, seed).await,
            Commands::Categories { all } => list_categories(&cfg, all).await,
            Commands::Artists { columns } => list_artists(&cfg, columns).await,
            Commands::Artist { name } => show_artist(&cfg, &name).await,
            Commands::Gallery { limit, seed } => show_gallery(&cfg, limit, seed).await,
            Commands::Diagnose { output } => diagnose(&cfg, output).await,
            Commands::Config => show_config(&cfg),
        }
    }

    fn resolved_config(&self) -> Result<ResolvedConfig> {
        let mut cfg = config::config()?.clone();
        if let Some(data) = &self.data {
            cfg.data.location = data.clone();
        }
        Ok(cfg)
    }
}

async fn open_catalog(cfg: &ResolvedConfig) -> Result<Catalog> {
    let source = source_for(&cfg.data.location);
    load_catalog(source.as_ref(), &cfg.data)
        .await
        .with_context(|| format!("Failed to load catalog from {}", cfg.data.location))
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// List categories
async fn list_categories(cfg: &ResolvedConfig, all: bool) -> Result<()> {
    let catalog = open_catalog(cfg).await?;
    let filter = CollectionFilter::new(&catalog, cfg.quiz.popular_top_n);

    let categories = if all {
        filter.category_counts()
    } else {
        filter.selectable_categories()
    };

    println!("{:<24} {:<28} COLLECTION", "ID", "LABEL");
    println!("{}", "-".repeat(80));

    for (category, counts) in categories {
        println!("{:<24} {:<28} {}", category.id, category.label, counts);
    }

    Ok(())
}

/// List artists, optionally in columns
async fn list_artists(cfg: &ResolvedConfig, columns: usize) -> Result<()> {
    let catalog = open_catalog(cfg).await?;
    let entries = artist_directory(&catalog);

    if entries.is_empty() {
        println!("No artists found");
        return Ok(());
    }

    let columns = directory_columns(&entries, columns);
    let rows = columns.first().map(Vec::len).unwrap_or(0);

    for row in 0..rows {
        let cells: Vec<String> = columns
            .iter()
            .filter_map(|column| column.get(row))
            .map(|e| format!("{:<36}", format!("{} ({})", e.name, e.painting_count)))
            .collect();
        println!("{}", cells.join(" ").trim_end());
    }

    println!("\n{} artists", entries.len());
    Ok(())
}

/// Show one artist's profile card
async fn show_artist(cfg: &ResolvedConfig, name: &str) -> Result<()> {
    let catalog = open_catalog(cfg).await?;

    if catalog.painting_count_for(name) == 0 && catalog.bio(name).is_none() {
        anyhow::bail!("Unknown artist: {}", name);
    }

    let profile = artist_profile(&catalog, name, None);

    println!("{}", profile.name);
    if let Some(lifespan) = &profile.lifespan {
        println!("  {}", lifespan);
    }
    if let Some(portrait) = &profile.portrait_url {
        println!("  Portrait: {}", portrait);
    }
    if !profile.tags.is_empty() {
        println!("  Tags: {}", profile.tags.join(", "));
    }
    if let Some(bio) = &profile.bio {
        println!("\n{}", bio);
    }

    println!("\nPaintings: {}", profile.painting_count);
    for thumbnail in &profile.thumbnails {
        println!("  - {} <{}>", thumbnail.title, thumbnail.url);
    }

    Ok(())
}

/// Show paintings in shuffled order
async fn show_gallery(cfg: &ResolvedConfig, limit: Option<usize>, seed: Option<u64>) -> Result<()> {
    let catalog = open_catalog(cfg).await?;
    let mut rng = rng_for(seed);
    let gallery = catalog.gallery(&mut rng);
    let limit = limit.unwrap_or(gallery.len());

    for painting in gallery.into_iter().take(limit) {
        let title = painting.display_title();
        println!(
            "{} - {}",
            if title.is_empty() { "Untitled" } else { title.as_str() },
            if painting.artist.is_empty() { "Unknown" } else { painting.artist.as_str() }
        );
        println!("    {}", painting.url);
    }

    Ok(())
}

/// Write the diagnostics report
async fn diagnose(cfg: &ResolvedConfig, output: Option<PathBuf>) -> Result<()> {
    let catalog = open_catalog(cfg).await?;
    let report = DiagnosticsReport::build(&catalog, cfg.quiz.popular_top_n);
    let markdown = report.to_markdown();

    match output {
        Some(path) => {
            tokio::fs::write(&path, markdown)
                .await
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            eprintln!("Diagnostics written to {}", path.display());
        }
        None => print!("{}", markdown),
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Data:");
    println!("  Location:       {}", cfg.data.location);
    println!("  Paintings:      {}", cfg.data.paintings);
    println!("  Bios:           {}", cfg.data.bios);
    println!("  Fetch timeout:  {}s", cfg.data.fetch_timeout_seconds);
    println!();
    println!("Quiz:");
    println!("  Streak target:  {}", cfg.quiz.streak_target);
    println!("  Choices:        {}", cfg.quiz.choice_count);
    println!("  Popular top N:  {}", cfg.quiz.popular_top_n);
    println!("  Distractor attempts: {}", cfg.quiz.distractor_attempts);
    println!("  Reveal delay:   {}ms", cfg.quiz.reveal_delay_ms);

    Ok(())
}
