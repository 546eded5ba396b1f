use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "skispec",
    about = "Skispec: surface area and weight-per-area for ski geometry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute surface area and relative weight with one algorithm
    Calc {
        #[command(flatten)]
        ski: SkiArgs,

        /// Algorithm: simple or integral (overrides --config)
        #[arg(long)]
        algorithm: Option<String>,

        /// Integral model: fraction of length from tail to waist
        #[arg(long)]
        waist_position: Option<f64>,

        /// Integral model: fraction of length taken by the tip
        #[arg(long)]
        tip_ratio: Option<f64>,

        /// JSON settings file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run every algorithm on the same ski and show the differences
    Compare {
        #[command(flatten)]
        ski: SkiArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available algorithms
    Algorithms {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Output as a Markdown table
        #[arg(long, conflicts_with = "json")]
        markdown: bool,
    },
}

/// Ski geometry and weight
#[derive(Args)]
pub struct SkiArgs {
    /// Length in cm
    #[arg(long)]
    pub length: f64,

    /// Tip width in mm
    #[arg(long)]
    pub tip: f64,

    /// Waist width in mm
    #[arg(long)]
    pub waist: f64,

    /// Tail width in mm
    #[arg(long)]
    pub tail: f64,

    /// Sidecut radius in m
    #[arg(long)]
    pub radius: f64,

    /// Weight of one ski in g
    #[arg(long)]
    pub weight: f64,
}
