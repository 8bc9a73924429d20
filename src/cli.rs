#![expect(clippy::print_stdout)]

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tabscope::analyser::{Analyzer, DrawingContext, PlotKind, PlotRequest, io};
use tabscope::config::Settings;

#[derive(Parser)]
#[command(name = "tabscope", about = "Summarise, chart and report on CSV or JSON data")]
pub struct Cli {
    /// JSON settings file (histogram bins, figure size, report indent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write daily-rotated log files to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print summary statistics of the numeric columns as JSON
    Stats {
        /// Input file (.csv or .json)
        input: PathBuf,
    },
    /// Print value counts for one column, most frequent first
    Freq {
        /// Input file (.csv or .json)
        input: PathBuf,
        /// Column to tabulate
        column: String,
    },
    /// Write the JSON analysis report
    Report {
        /// Input file (.csv or .json)
        input: PathBuf,

        /// Report destination; an existing file is replaced
        #[arg(short, long, default_value = "analysis_report.json")]
        output: PathBuf,
    },
    /// Render one chart as SVG
    Plot {
        /// Input file (.csv or .json)
        input: PathBuf,
        /// bar, scatter, line or histogram
        kind: String,
        /// Column on the x axis
        x: String,

        /// Column on the y axis (required for scatter)
        #[arg(long)]
        y: Option<String>,

        /// Chart title. Defaults to "<Kind> Plot of <x>"
        #[arg(long)]
        title: Option<String>,

        #[arg(short, long, default_value = "plot.svg")]
        output: PathBuf,
    },
    /// Write a sample dataset, its report and three charts
    Demo {
        /// Output directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path).context("Failed to load settings")?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Stats { input } => handle_stats(&input, settings),
        Commands::Freq { input, column } => handle_freq(&input, &column, settings),
        Commands::Report { input, output } => handle_report(&input, &output, settings),
        Commands::Plot {
            input,
            kind,
            x,
            y,
            title,
            output,
        } => {
            let mut request = PlotRequest::parse(&kind, x)?;
            request.y_column = y;
            request.title = title;
            handle_plot(&input, &request, &output, settings)
        }
        Commands::Demo { dir } => handle_demo(&dir, settings),
    }
}

fn load(input: &Path, settings: Settings) -> Result<Analyzer> {
    Analyzer::with_settings(input, settings)
        .with_context(|| format!("Failed to load {}", input.display()))
}

fn handle_stats(input: &Path, settings: Settings) -> Result<()> {
    let indent = settings.report_indent;
    let report = load(input, settings)?.build_report()?;
    let json = String::from_utf8(report.to_json(indent)?)?;
    print!("{json}");
    Ok(())
}

fn handle_freq(input: &Path, column: &str, settings: Settings) -> Result<()> {
    let table = load(input, settings)?.analyze_categorical_data(column)?;
    let width = table.iter().map(|e| e.value.len()).max().unwrap_or(0);
    println!("{column}");
    for entry in &table {
        println!("{:<width$}  {}", entry.value, entry.count);
    }
    Ok(())
}

fn handle_report(input: &Path, output: &Path, settings: Settings) -> Result<()> {
    load(input, settings)?
        .save_analysis_report(output)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;
    println!("Report written to {}", output.display());
    Ok(())
}

fn handle_plot(
    input: &Path,
    request: &PlotRequest,
    output: &Path,
    settings: Settings,
) -> Result<()> {
    let mut ctx = DrawingContext::from_settings(&settings);
    let id = load(input, settings)?.create_visualization(&mut ctx, request)?;
    ctx.save(id, output)?;
    println!("{} plot written to {}", request.kind, output.display());
    Ok(())
}

fn handle_demo(dir: &Path, settings: Settings) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut sample = df!(
        "sales" => &[100i64, 150, 200, 120, 180, 210, 160, 190, 140, 170],
        "customer_type" => &["A", "B", "A", "C", "B", "A", "C", "B", "A", "B"],
        "satisfaction" => &[4.5, 3.8, 4.2, 3.9, 4.7, 4.1, 3.6, 4.3, 4.0, 4.4]
    )?;
    let data_path = dir.join("sample_data.csv");
    io::save_csv(&mut sample, &data_path)?;

    let mut ctx = DrawingContext::from_settings(&settings);
    let analyzer = load(&data_path, settings)?;
    analyzer.save_analysis_report(&dir.join("analysis_report.json"))?;

    let charts = [
        (
            PlotRequest::new(PlotKind::Bar, "customer_type").with_title("Customer Type Distribution"),
            "customer_distribution.svg",
        ),
        (
            PlotRequest::new(PlotKind::Scatter, "sales")
                .with_y("satisfaction")
                .with_title("Sales vs Customer Satisfaction"),
            "sales_satisfaction_scatter.svg",
        ),
        (
            PlotRequest::new(PlotKind::Histogram, "satisfaction")
                .with_title("Distribution of Satisfaction Scores"),
            "satisfaction_histogram.svg",
        ),
    ];
    for (request, file_name) in &charts {
        let id = analyzer.create_visualization(&mut ctx, request)?;
        ctx.save(id, &dir.join(file_name))?;
    }

    println!("Demo output written to {}", dir.display());
    Ok(())
}
