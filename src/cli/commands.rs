use crate::analyzers::TextReport;
use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{RawObservation, Season};
use crate::processors::{FillPolicy, Imputer, PipelineOutput, ReportRenderer, WeatherPipeline};
use crate::readers::ObservationReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, SummaryWriter};
use std::path::Path;
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    let config = PipelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            input,
            output_file,
            summary_json,
            validate_only,
        } => {
            let output_file = output_file.unwrap_or_else(|| config.output_file.clone());
            info!(
                input = %input.display(),
                output = %output_file.display(),
                "Processing weather data"
            );

            let raw = read_observations(&input, &config).await?;

            let progress = ProgressReporter::new_spinner("Running pipeline...", cli.quiet);
            let pipeline = WeatherPipeline::from_config(&config);
            let (result, progress) = tokio::task::spawn_blocking(move || {
                let result = pipeline.run_with_progress(&raw, Some(&progress));
                (result, progress)
            })
            .await?;

            let output = match result {
                Ok(output) => output,
                Err(e) => {
                    progress.abandon_with_message("Pipeline failed; no output written");
                    return Err(e);
                }
            };
            progress.finish_with_message(&format!(
                "Processed {} records",
                output.table().len()
            ));

            let mut renderer =
                TextReport::new(std::io::stdout()).with_precision(config.float_precision);

            if validate_only {
                renderer.render(&output)?;
                println!("\nValidation complete - no output file written");
                return Ok(());
            }

            publish_outputs(&output, &mut renderer, &output_file, summary_json.as_deref())?;

            if let Some(path) = &summary_json {
                println!("Summary statistics saved to '{}'", path.display());
            }
            println!(
                "\nAnalysis complete! Results saved to '{}'",
                output_file.display()
            );
        }

        Commands::Validate { input } => {
            let raw = read_observations(&input, &config).await?;
            print_validation(&raw);
        }

        Commands::Seasons => {
            for season in Season::ALL {
                let months: Vec<String> = season.months().iter().map(|m| m.to_string()).collect();
                println!("{:<8} {}", season.as_str(), months.join(", "));
            }
        }
    }

    Ok(())
}

async fn read_observations(input: &Path, config: &PipelineConfig) -> Result<Vec<RawObservation>> {
    let bytes = tokio::fs::read(input).await?;
    let reader = ObservationReader::with_date_formats(config.date_formats.clone());
    let raw = reader.read_bytes(&bytes)?;
    info!(rows = raw.len(), "Loaded observations");
    Ok(raw)
}

/// Render the report and write the CSV export plus the optional JSON
/// summary. Either both files end up on disk or neither does: the summary
/// is serialized before the CSV is written and only moved into place
/// afterwards.
fn publish_outputs(
    output: &PipelineOutput,
    renderer: &mut dyn ReportRenderer,
    output_file: &Path,
    summary_json: Option<&Path>,
) -> Result<()> {
    let staged = summary_json
        .map(|path| SummaryWriter::new().stage(output, path))
        .transpose()?;

    let mut exporter = CsvWriter::new(output_file);
    WeatherPipeline::publish(output, renderer, &mut exporter)?;

    if let Some(staged) = staged {
        if let Err(e) = staged.commit() {
            if let Err(remove_err) = std::fs::remove_file(output_file) {
                warn!(
                    path = %output_file.display(),
                    error = %remove_err,
                    "Could not remove CSV export after summary failure"
                );
            }
            return Err(e);
        }
    }

    Ok(())
}

fn print_validation(raw: &[RawObservation]) {
    println!("Rows: {}", raw.len());

    if let (Some(first), Some(last)) = (
        raw.iter().map(|r| r.date).min(),
        raw.iter().map(|r| r.date).max(),
    ) {
        println!("Date range: {} to {}", first, last);
    }

    let counts = Imputer::missing_counts(raw);
    println!("\nMissing Values:");
    for (field, missing) in &counts {
        println!("{:<12} {}", field.column_header(), missing);
    }

    let complete = raw.iter().filter(|r| r.is_complete()).count();
    println!("\nComplete rows: {}/{}", complete, raw.len());

    // Constant-filled columns can always be imputed, even when empty.
    let unfillable: Vec<&str> = counts
        .iter()
        .filter(|(field, missing)| {
            *missing == raw.len() && !matches!(Imputer::policy(*field), FillPolicy::Constant(_))
        })
        .map(|(field, _)| field.name())
        .collect();

    if unfillable.is_empty() {
        println!("✅ All columns can be imputed");
    } else {
        println!("⚠️  No values to impute from in: {}", unfillable.join(", "));
    }
}
