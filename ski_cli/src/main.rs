//! # Skispec CLI
//!
//! Command-line front end for `ski_core`: compute surface metrics for one
//! ski, compare the algorithms side by side, or list what is available.
//!
//! Set `RUST_LOG=ski_core=debug` to see the intermediate section values.

mod cli;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ski_core::equations::registry::generate_equations_markdown;
use ski_core::equations::{Equation, EquationKind, EquationMetadata, SurfaceEquation, ALL_EQUATIONS};
use ski_core::{CalcError, CalcResult, CalculationResult, CalculationSettings, ComputedMetrics, SkiDimensions};

use cli::{Cli, Commands, SkiArgs};

const RULE: &str = "═══════════════════════════════════════";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (outcome, json) = match cli.command {
        Commands::Calc {
            ski,
            algorithm,
            waist_position,
            tip_ratio,
            config,
            json,
        } => {
            let outcome = load_settings(config.as_deref(), algorithm.as_deref(), waist_position, tip_ratio)
                .and_then(|settings| run_calc(&ski, &settings, json));
            (outcome, json)
        }
        Commands::Compare { ski, json } => (run_compare(&ski, json), json),
        Commands::Algorithms { json, markdown } => (run_algorithms(json, markdown), json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

impl SkiArgs {
    fn dimensions(&self) -> SkiDimensions {
        SkiDimensions::new(self.length, self.tip, self.waist, self.tail, self.radius)
    }
}

/// Settings from an optional file, then command-line overrides.
fn load_settings(
    config: Option<&Path>,
    algorithm: Option<&str>,
    waist_position: Option<f64>,
    tip_ratio: Option<f64>,
) -> CalcResult<CalculationSettings> {
    let mut settings = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| CalcError::invalid_input("config", path.display().to_string(), e.to_string()))?;
            CalculationSettings::from_json(&text)?
        }
        None => CalculationSettings::default(),
    };

    if let Some(name) = algorithm {
        settings.algorithm = name.parse()?;
    }
    if let Some(value) = waist_position {
        settings.waist_position = value;
    }
    if let Some(value) = tip_ratio {
        settings.tip_ratio = value;
    }
    Ok(settings)
}

#[derive(Serialize)]
struct CalcOutput {
    algorithm: EquationKind,
    dimensions: SkiDimensions,
    weight: f64,
    metrics: ComputedMetrics,
}

fn run_calc(ski: &SkiArgs, settings: &CalculationSettings, json: bool) -> CalcResult<()> {
    let equation = settings.build_equation()?;
    let dimensions = ski.dimensions();
    let metrics = ComputedMetrics::compute(&equation, &dimensions, ski.weight)?;

    if json {
        let output = CalcOutput {
            algorithm: equation.kind(),
            dimensions,
            weight: ski.weight,
            metrics,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", RULE);
    println!("  SKI SURFACE CALCULATION");
    println!("{}", RULE);
    println!();
    print_input(ski);
    println!();
    println!("Algorithm: {} (v{})", equation.name(), metrics.algorithm_version);
    if let Equation::Integral(integral) = &equation {
        let sections = integral.section_lengths(dimensions.length_cm);
        println!(
            "  Sections: back {:.1} / front {:.1} / tip {:.1} cm",
            sections.l_back, sections.l_front, sections.l_tip
        );
    }
    println!();
    print_result(&metrics.result());
    println!("{}", RULE);
    Ok(())
}

#[derive(Serialize)]
struct CompareEntry {
    algorithm: EquationKind,
    version: &'static str,
    result: Option<CalculationResult>,
    error: Option<ErrorOutput>,
}

#[derive(Serialize)]
struct CompareOutput {
    dimensions: SkiDimensions,
    weight: f64,
    entries: Vec<CompareEntry>,
}

fn run_compare(ski: &SkiArgs, json: bool) -> CalcResult<()> {
    let dimensions = ski.dimensions();
    let entries: Vec<CompareEntry> = ALL_EQUATIONS
        .iter()
        .map(|kind| {
            let equation = Equation::from_kind(*kind);
            let outcome = equation.calculate(&dimensions, ski.weight);
            CompareEntry {
                algorithm: *kind,
                version: equation.algorithm_version(),
                result: outcome.as_ref().ok().copied(),
                error: outcome.err().map(|e| ErrorOutput::from(&e)),
            }
        })
        .collect();

    if json {
        let output = CompareOutput {
            dimensions,
            weight: ski.weight,
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", RULE);
    println!("  ALGORITHM COMPARISON");
    println!("{}", RULE);
    println!();
    print_input(ski);

    let mut baseline: Option<f64> = None;
    for entry in &entries {
        println!();
        println!("{} (v{}):", entry.algorithm, entry.version);
        match (&entry.result, &entry.error) {
            (Some(result), _) => {
                print_result(result);
                match baseline {
                    Some(base) => println!(
                        "  Δ vs first:      {:+.2} cm² ({:+.1}%)",
                        result.surface_area - base,
                        (result.surface_area - base) / base * 100.0
                    ),
                    None => baseline = Some(result.surface_area),
                }
            }
            (None, Some(err)) => println!("  [FAIL] {}: {}", err.code, err.message),
            (None, None) => {}
        }
    }
    println!("{}", RULE);
    Ok(())
}

fn run_algorithms(json: bool, markdown: bool) -> CalcResult<()> {
    if markdown {
        print!("{}", generate_equations_markdown());
        return Ok(());
    }

    let metadata: Vec<EquationMetadata> = ALL_EQUATIONS.iter().map(|kind| kind.metadata()).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    let current = Equation::current().kind();
    for meta in metadata {
        let marker = if meta.kind == current { " (current)" } else { "" };
        println!("{:<9} v{}  {}{}", meta.kind, meta.version, meta.name, marker);
        println!("          {}", meta.formula);
        println!("          {}", meta.description);
    }
    Ok(())
}

fn print_input(ski: &SkiArgs) {
    println!("Input:");
    println!("  Length:  {:.1} cm", ski.length);
    println!(
        "  Widths:  {:.0} / {:.0} / {:.0} mm (tip / waist / tail)",
        ski.tip, ski.waist, ski.tail
    );
    println!("  Radius:  {:.1} m", ski.radius);
    println!("  Weight:  {:.0} g", ski.weight);
}

fn print_result(result: &CalculationResult) {
    println!("  Surface area:    {:.2} cm²", result.surface_area);
    println!("  Relative weight: {:.2} g/cm²", result.relative_weight);
}

#[derive(Serialize)]
struct ErrorOutput {
    code: &'static str,
    message: String,
    context: serde_json::Value,
}

impl From<&CalcError> for ErrorOutput {
    fn from(err: &CalcError) -> Self {
        ErrorOutput {
            code: err.error_code(),
            message: err.to_string(),
            context: err.context(),
        }
    }
}

fn report_error(err: &CalcError, json: bool) {
    eprintln!("Error [{}]: {}", err.error_code(), err);
    if json {
        if let Ok(text) = serde_json::to_string_pretty(&ErrorOutput::from(err)) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", text);
        }
    }
}
