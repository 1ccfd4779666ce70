use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-prep")]
#[command(about = "Clean, enrich and summarize daily weather observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Impute, derive features, summarize and export a weather CSV
    Process {
        #[arg(
            short,
            long,
            help = "Input CSV with Date, Temperature, Humidity, WindSpeed, Rainfall"
        )]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: weather_analysis_output.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Also write the summary statistics as JSON")]
        summary_json: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// Check an input CSV and report missing values without writing output
    Validate {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,
    },

    /// Print the month to season mapping
    Seasons,
}
