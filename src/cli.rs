use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::services::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "sentix", version, about = "Batch sentiment analysis through an LLM")]
pub struct Cli {
    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<PathBuf>,
    #[arg(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze texts given on the command line or in a file
    Analyze(AnalyzeArgs),
    /// Line-oriented session; each line is analyzed as one text
    Interactive,
}

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    #[arg(long = "text", short = 't', help = "Text to analyze (repeatable)")]
    pub texts: Vec<String>,
    #[arg(long, short, help = "A .txt, .json or .csv file")]
    pub file: Option<PathBuf>,
    #[arg(long, value_parser = parse_export_format, help = "Write results as json, csv or pdf (repeatable)")]
    pub export: Vec<ExportFormat>,
    #[arg(long, help = "Directory for exported files (defaults to config output_dir)")]
    pub out_dir: Option<PathBuf>,
}

fn parse_export_format(name: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(name).ok_or_else(|| format!("unknown export format '{}' (expected json, csv or pdf)", name))
}
